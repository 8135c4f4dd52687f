//! Hostlist expressions ("node[01-03,07],gpu1").

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\[]*)\[([^\]]+)\](.*)$").expect("valid regex"));

/// Upper bound on expanded hosts, guards against "n[0-999999999]".
const MAX_HOSTS: usize = 65_536;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HostlistError {
    #[error("Unbalanced brackets in hostlist: {0}")]
    Unbalanced(String),

    #[error("Invalid range '{0}' in hostlist")]
    InvalidRange(String),

    #[error("Hostlist expands to more than {MAX_HOSTS} hosts")]
    TooLarge,
}

/// Expand a hostlist expression into individual host names.
pub fn expand_hostlist(expr: &str) -> Result<Vec<String>, HostlistError> {
    let mut hosts = Vec::new();
    for part in split_top_level(expr)? {
        expand_part(part, &mut hosts)?;
    }
    Ok(hosts)
}

/// Split on commas that are not inside brackets.
fn split_top_level(expr: &str) -> Result<Vec<&str>, HostlistError> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(HostlistError::Unbalanced(expr.to_string()));
                }
            }
            ',' if depth == 0 => {
                parts.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(HostlistError::Unbalanced(expr.to_string()));
    }
    parts.push(&expr[start..]);

    Ok(parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect())
}

fn expand_part(part: &str, out: &mut Vec<String>) -> Result<(), HostlistError> {
    let Some(caps) = BRACKET_RE.captures(part) else {
        out.push(part.to_string());
        return Ok(());
    };

    let prefix = &caps[1];
    let suffixes = if caps[3].is_empty() {
        vec![String::new()]
    } else {
        let mut rest = Vec::new();
        expand_part(&caps[3], &mut rest)?;
        rest
    };

    for range in caps[2].split(',') {
        for index in expand_range(range)? {
            for suffix in &suffixes {
                if out.len() >= MAX_HOSTS {
                    return Err(HostlistError::TooLarge);
                }
                out.push(format!("{}{}{}", prefix, index, suffix));
            }
        }
    }
    Ok(())
}

/// Expand "01-03" (keeping zero padding) or a single index.
fn expand_range(range: &str) -> Result<Vec<String>, HostlistError> {
    let range = range.trim();
    let invalid = || HostlistError::InvalidRange(range.to_string());

    let Some((lo, hi)) = range.split_once('-') else {
        range.parse::<u64>().map_err(|_| invalid())?;
        return Ok(vec![range.to_string()]);
    };

    let width = lo.len();
    let start: u64 = lo.parse().map_err(|_| invalid())?;
    let end: u64 = hi.parse().map_err(|_| invalid())?;
    if end < start || (end - start) as usize >= MAX_HOSTS {
        return Err(invalid());
    }

    Ok((start..=end)
        .map(|n| format!("{:0width$}", n, width = width))
        .collect())
}
