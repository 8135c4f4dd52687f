//! Trackable resources (TRES).

use serde::{Deserialize, Serialize};
use slurmrest_parsers::parse_memory_mb;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tres {
    /// Wire `type`: "cpu", "mem", "gres", "license", ...
    pub kind: String,
    /// Sub-name, e.g. "gpu" for "gres/gpu".
    pub name: String,
    pub id: u32,
    pub count: i64,
}

impl Tres {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, count: i64) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            id: 0,
            count,
        }
    }

    /// "gres/gpu" or "cpu".
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.kind.clone()
        } else {
            format!("{}/{}", self.kind, self.name)
        }
    }
}

impl fmt::Display for Tres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label(), self.count)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid TRES entry '{0}'")]
pub struct TresParseError(pub String);

/// Format as "cpu=4,mem=8192,gres/gpu=2".
pub fn format_tres(tres: &[Tres]) -> String {
    tres.iter()
        .map(Tres::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse "cpu=4,mem=8G,gres/gpu=2". Memory accepts unit suffixes and is
/// stored in MB.
pub fn parse_tres(s: &str) -> Result<Vec<Tres>, TresParseError> {
    slurmrest_parsers::split_csv(s)
        .into_iter()
        .map(|entry| {
            let (label, value) = entry
                .split_once('=')
                .ok_or_else(|| TresParseError(entry.clone()))?;
            let (kind, name) = label.split_once('/').unwrap_or((label, ""));
            let count = if kind == "mem" {
                parse_memory_mb(value).and_then(|v| i64::try_from(v).ok())
            } else {
                value.parse::<i64>().ok()
            }
            .ok_or_else(|| TresParseError(entry.clone()))?;
            Ok(Tres::new(kind, name, count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tres() {
        let tres = vec![
            Tres::new("cpu", "", 4),
            Tres::new("mem", "", 8192),
            Tres::new("gres", "gpu", 2),
        ];
        assert_eq!(format_tres(&tres), "cpu=4,mem=8192,gres/gpu=2");
        assert_eq!(format_tres(&[]), "");
    }

    #[test]
    fn test_parse_tres() {
        let tres = parse_tres("cpu=4,mem=8G,gres/gpu=2").unwrap();
        assert_eq!(tres.len(), 3);
        assert_eq!(tres[1].count, 8192);
        assert_eq!(tres[2].label(), "gres/gpu");
        assert!(parse_tres("").unwrap().is_empty());
        assert!(parse_tres("cpu").is_err());
        assert!(parse_tres("cpu=lots").is_err());
    }

    #[test]
    fn test_parse_tres_rejects_oversized_memory() {
        let err = parse_tres("cpu=1,mem=99999999999999T").unwrap_err();
        assert_eq!(err, TresParseError("mem=99999999999999T".to_string()));
        // Fits in u64 megabytes but not in the i64 count.
        assert!(parse_tres("mem=10000000000000T").is_err());
    }
}
