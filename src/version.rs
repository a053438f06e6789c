use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A semantic version used both for the application version and for version-gated flag values.
///
/// Parsing never fails: text that cannot be read as a version becomes [Version::NULL]. Build
/// metadata is discarded on parse, so two versions differing only in build metadata are equal.
/// Ordering compares major, minor and patch numerically, then pre-release identifiers using
/// semver precedence (`2.0.0-rc < 2.0.0`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(semver::Version);

impl Version {
    /// The sentinel that unparseable input resolves to, equivalent to `0.0.0`.
    pub const NULL: Version = Version(semver::Version::new(0, 0, 0));

    /// Parse `text` into a version, resolving to [Version::NULL] if it is not a valid version.
    pub fn parse(text: &str) -> Version {
        Version::try_parse(text).unwrap_or(Version::NULL)
    }

    /// Parse `text` into a version, returning None unless it is a full `major.minor.patch`
    /// version with optional pre-release and build suffixes. `"2"`, `"2.1"` and text with
    /// surrounding whitespace are rejected.
    pub fn try_parse(text: &str) -> Option<Version> {
        semver::Version::parse(text).ok().map(Version::from)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Returns true if this is the [Version::NULL] sentinel.
    pub fn is_null(&self) -> bool {
        *self == Version::NULL
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::NULL
    }
}

impl From<semver::Version> for Version {
    fn from(mut version: semver::Version) -> Self {
        version.build = semver::BuildMetadata::EMPTY;
        Version(version)
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::parse(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
