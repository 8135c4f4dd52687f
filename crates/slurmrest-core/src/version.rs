//! slurmrestd API versions.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `vMAJOR.MINOR.PATCH` API version, e.g. v0.0.43.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid API version '{0}', expected vX.Y.Z")]
pub struct VersionParseError(pub String);

impl ApiVersion {
    pub const V0_0_39: Self = Self::new(0, 0, 39);
    pub const V0_0_40: Self = Self::new(0, 0, 40);
    pub const V0_0_41: Self = Self::new(0, 0, 41);
    pub const V0_0_42: Self = Self::new(0, 0, 42);
    pub const V0_0_43: Self = Self::new(0, 0, 43);
    pub const V0_0_44: Self = Self::new(0, 0, 44);

    /// Versions with an adapter, oldest first.
    pub const SUPPORTED: [Self; 5] = [
        Self::V0_0_40,
        Self::V0_0_41,
        Self::V0_0_42,
        Self::V0_0_43,
        Self::V0_0_44,
    ];

    /// Versions slurmrestd still serves that have no adapter.
    pub const LEGACY: [Self; 1] = [Self::V0_0_39];

    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        let err = || VersionParseError(s.to_string());
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parts: Vec<u16> = trimmed
            .split('.')
            .map(|p| p.parse::<u16>().map_err(|_| err()))
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(err()),
        }
    }

    pub fn latest() -> Self {
        Self::V0_0_44
    }

    /// Most widely deployed version, used when nothing else is configured.
    pub fn stable() -> Self {
        Self::V0_0_42
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    pub fn is_legacy(&self) -> bool {
        Self::LEGACY.contains(self)
    }

    /// Slurm releases that ship this API version.
    pub fn slurm_releases(&self) -> &'static [&'static str] {
        match (self.major, self.minor, self.patch) {
            (0, 0, 39) => &["23.02", "23.11"],
            (0, 0, 40) => &["23.11", "24.05"],
            (0, 0, 41) => &["24.05", "24.11"],
            (0, 0, 42) => &["24.11", "25.05"],
            (0, 0, 43) => &["25.05", "25.11"],
            (0, 0, 44) => &["25.11"],
            _ => &[],
        }
    }

    /// Resolve a configured selector: "latest", "stable" or an exact version.
    ///
    /// Legacy versions yield `NotImplemented`; anything else unknown is a
    /// validation error.
    pub fn select(selector: &str) -> Result<Self, Error> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "" | "stable" => return Ok(Self::stable()),
            "latest" => return Ok(Self::latest()),
            _ => {}
        }

        let version = Self::parse(selector)
            .map_err(|e| Error::validation("SelectVersion", "api_version", e.to_string()))?;

        if version.is_supported() {
            Ok(version)
        } else if version.is_legacy() {
            Err(Error::NotImplemented {
                operation: "SelectVersion".to_string(),
                version: version.to_string(),
            })
        } else {
            Err(Error::validation(
                "SelectVersion",
                "api_version",
                format!(
                    "unsupported API version {}, expected one of {}",
                    version,
                    Self::SUPPORTED
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ))
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
