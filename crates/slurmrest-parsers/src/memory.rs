//! Memory size parsing.

/// Parse a Slurm memory string to megabytes.
///
/// Accepts "4G", "1000M", "4096K", "1T" and bare numbers (megabytes).
/// Returns None for empty strings, unparseable values, or sizes that do not
/// fit in a u64 megabyte count.
pub fn parse_memory_mb(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let upper = s.to_ascii_uppercase();
    let upper = upper.trim_end_matches('B');

    if let Some(stripped) = upper.strip_suffix('T') {
        stripped.parse::<u64>().ok()?.checked_mul(1024 * 1024)
    } else if let Some(stripped) = upper.strip_suffix('G') {
        stripped.parse::<u64>().ok()?.checked_mul(1024)
    } else if let Some(stripped) = upper.strip_suffix('M') {
        stripped.parse::<u64>().ok()
    } else if let Some(stripped) = upper.strip_suffix('K') {
        stripped.parse::<u64>().ok().map(|v| v / 1024)
    } else {
        upper.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_mb() {
        assert_eq!(parse_memory_mb("4G"), Some(4096));
        assert_eq!(parse_memory_mb("4gb"), Some(4096));
        assert_eq!(parse_memory_mb("1000M"), Some(1000));
        assert_eq!(parse_memory_mb("4096K"), Some(4));
        assert_eq!(parse_memory_mb("1T"), Some(1_048_576));
        assert_eq!(parse_memory_mb("4096"), Some(4096));
        assert_eq!(parse_memory_mb(""), None);
        assert_eq!(parse_memory_mb("lots"), None);
    }

    #[test]
    fn test_parse_memory_mb_overflow() {
        assert_eq!(parse_memory_mb("99999999999999T"), None);
        assert_eq!(parse_memory_mb("18446744073709551615G"), None);
        assert_eq!(parse_memory_mb("18446744073709551616"), None);
        assert_eq!(parse_memory_mb("17592186044415T"), Some(18_446_744_073_708_503_040));
    }
}
