//! Shared helpers for decoding slurmrestd wire shapes.
//!
//! Every version crate leans on these so that the same wire quirk
//! (comma-joined lists, optional-number wrappers, unix timestamps) is
//! decoded the same way everywhere.

pub mod hostlist;
pub mod memory;
pub mod noval;
pub mod time;

pub use hostlist::{HostlistError, expand_hostlist};
pub use memory::parse_memory_mb;
pub use noval::{NoVal, OptionalNumber, noval_or_zero};
pub use time::{from_unix, minutes_from_duration, parse_duration, to_unix};

/// Split a comma-joined wire list.
///
/// An empty (or all-whitespace) string yields an empty list, never a list
/// holding one empty entry.
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a list back into its comma-joined wire form.
///
/// Returns None for an empty list so callers can omit the field.
pub fn join_csv(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(","))
    }
}

/// Drop empty strings from an optional wire list.
pub fn clean_list(items: Option<&Vec<String>>) -> Vec<String> {
    items
        .map(|v| v.iter().filter(|s| !s.is_empty()).cloned().collect())
        .unwrap_or_default()
}

/// Present-or-absent helper for `to_wire` conversions of string fields.
pub fn present(s: &str) -> Option<String> {
    Some(s.to_string()).filter(|s| !s.is_empty())
}

/// Present-or-absent helper for `to_wire` conversions of list fields.
pub fn present_list(items: &[String]) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv("user1,user2"), vec!["user1", "user2"]);
        assert_eq!(split_csv(" a , b ,"), vec!["a", "b"]);
        assert!(split_csv("").is_empty());
        assert!(split_csv("   ").is_empty());
    }

    #[test]
    fn test_join_csv() {
        assert_eq!(
            join_csv(&["a".to_string(), "b".to_string()]),
            Some("a,b".to_string())
        );
        assert_eq!(join_csv(&[]), None);
    }

    #[test]
    fn test_clean_list() {
        let raw = vec!["gpu".to_string(), String::new(), "ib".to_string()];
        assert_eq!(clean_list(Some(&raw)), vec!["gpu", "ib"]);
        assert!(clean_list(None).is_empty());
    }
}
