//! Turn HTTP status codes and slurmrestd error bodies into [`Error`]s.
//!
//! Pure functions over their inputs; safe to call from any thread.

use crate::error::ErrorKind::{
    AuthenticationFailed, ResourceConflict, ResourceNotFound, ServerError, ValidationFailed,
};
use crate::error::{ApiErrorDetail, Error, ErrorKind, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<WireErrorEntry>,

    /// Plain `{"error": "...", "code": N}` bodies from proxies and older
    /// gateways.
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    code: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct WireErrorEntry {
    #[serde(default)]
    error_number: Option<i32>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

/// A Slurm error number with its symbolic name, the kind it refines a
/// non-specific status into, and Slurm's own wording for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlurmErrno {
    pub number: i32,
    pub name: &'static str,
    pub kind: ErrorKind,
    pub description: &'static str,
}

impl SlurmErrno {
    /// Slurm's wording followed by the symbolic name.
    pub fn message(&self) -> String {
        format!("{} ({})", self.description, self.name)
    }
}

const fn errno(
    number: i32,
    name: &'static str,
    kind: ErrorKind,
    description: &'static str,
) -> SlurmErrno {
    SlurmErrno {
        number,
        name,
        kind,
        description,
    }
}

const SLURM_ERRNOS: &[SlurmErrno] = &[
    // slurmctld: jobs, nodes and partitions
    errno(2000, "ESLURM_INVALID_PARTITION_NAME", ResourceNotFound, "Invalid partition name specified"),
    errno(2001, "ESLURM_DEFAULT_PARTITION_NOT_SET", ValidationFailed, "No partition specified or system default partition"),
    errno(2002, "ESLURM_ACCESS_DENIED", AuthenticationFailed, "Access/permission denied"),
    errno(2004, "ESLURM_REQUESTED_NODES_NOT_IN_PARTITION", ValidationFailed, "Requested nodes not in this partition"),
    errno(2005, "ESLURM_TOO_MANY_REQUESTED_CPUS", ValidationFailed, "More processors requested than permitted"),
    errno(2006, "ESLURM_INVALID_NODE_COUNT", ValidationFailed, "Node count specification invalid"),
    errno(2009, "ESLURM_JOB_SCRIPT_MISSING", ValidationFailed, "Batch job submission without a script"),
    errno(2010, "ESLURM_USER_ID_MISSING", ValidationFailed, "Invalid user id"),
    errno(2011, "ESLURM_DUPLICATE_JOB_ID", ResourceConflict, "Duplicate job id"),
    errno(2016, "ESLURM_NODES_BUSY", ResourceConflict, "Requested nodes are busy"),
    errno(2017, "ESLURM_INVALID_JOB_ID", ResourceNotFound, "Invalid job id specified"),
    errno(2018, "ESLURM_INVALID_NODE_NAME", ResourceNotFound, "Invalid node name specified"),
    errno(2020, "ESLURM_TRANSITION_STATE_NO_UPDATE", ResourceConflict, "Job can not be altered now, try again later"),
    errno(2021, "ESLURM_ALREADY_DONE", ResourceConflict, "Job/step already completing or completed"),
    errno(2024, "ESLURM_JOB_PENDING", ResourceConflict, "Job is pending execution"),
    errno(2028, "ESLURM_INVALID_NODE_STATE", ValidationFailed, "Invalid node state specified"),
    errno(2029, "ESLURM_INVALID_FEATURE", ValidationFailed, "Invalid feature specification"),
    // accounts, reservations, wckeys, QOS
    errno(2045, "ESLURM_INVALID_ACCOUNT", ResourceNotFound, "Invalid account or account/partition combination specified"),
    errno(2046, "ESLURM_INVALID_PARENT_ACCOUNT", ResourceNotFound, "Invalid parent account specified"),
    errno(2047, "ESLURM_SAME_PARENT_ACCOUNT", ResourceConflict, "Account already child of parent account specified"),
    errno(2050, "ESLURM_ACCOUNTING_POLICY", ValidationFailed, "Job violates accounting/QOS policy"),
    errno(2051, "ESLURM_INVALID_TIME_LIMIT", ValidationFailed, "Requested time limit is invalid"),
    errno(2052, "ESLURM_RESERVATION_ACCESS", AuthenticationFailed, "Access denied to requested reservation"),
    errno(2053, "ESLURM_RESERVATION_INVALID", ResourceNotFound, "Requested reservation is invalid"),
    errno(2055, "ESLURM_RESERVATION_BUSY", ResourceConflict, "Requested reservation is in use"),
    errno(2056, "ESLURM_RESERVATION_NOT_USABLE", ResourceConflict, "Requested reservation not usable now"),
    errno(2057, "ESLURM_INVALID_WCKEY", ResourceNotFound, "Invalid wckey specified"),
    errno(2058, "ESLURM_RESERVATION_OVERLAP", ResourceConflict, "Requested reservation overlaps with another reservation"),
    errno(2066, "ESLURM_INVALID_QOS", ResourceNotFound, "Invalid qos specification"),
    errno(2068, "ESLURM_NODE_NOT_AVAIL", ResourceConflict, "Required node not available (down, drained or reserved)"),
    errno(2070, "ESLURM_PARTITION_NOT_AVAIL", ResourceConflict, "Required partition not available (inactive or drain)"),
    errno(2072, "ESLURM_INVALID_GRES", ValidationFailed, "Invalid generic resource (gres) specification"),
    errno(2082, "ESLURM_RESERVATION_NAME_DUP", ResourceConflict, "Duplicate reservation name"),
    errno(2084, "ESLURM_JOB_FINISHED", ResourceConflict, "Job has already finished"),
    errno(2085, "ESLURM_JOB_NOT_RUNNING", ResourceConflict, "Job is not running"),
    // auth plugins
    errno(6000, "ESLURM_AUTH_CRED_INVALID", AuthenticationFailed, "Invalid authentication credential"),
    // slurmdbd
    errno(7000, "ESLURM_DB_CONNECTION", ServerError, "Unable to contact database"),
    errno(7001, "ESLURM_JOBS_RUNNING_ON_ASSOC", ResourceConflict, "Job(s) active, cancel job(s) before remove"),
    errno(7002, "ESLURM_CLUSTER_DELETED", ResourceNotFound, "Cluster deleted, commit/rollback immediately"),
    errno(7004, "ESLURM_BAD_NAME", ValidationFailed, "Invalid character in name"),
    errno(7009, "ESLURM_NO_REMOVE_DEFAULT_ACCOUNT", ResourceConflict, "Cannot remove the last association holding a user's default account"),
    errno(7011, "ESLURM_NO_REMOVE_DEFAULT_QOS", ResourceConflict, "Cannot remove the default QOS"),
    // slurmrestd
    errno(9000, "ESLURM_REST_INVALID_QUERY", ValidationFailed, "Query empty or not RFC7320 compliant"),
    errno(9001, "ESLURM_REST_FAIL_PARSING", ValidationFailed, "Failure during parsing"),
    errno(9002, "ESLURM_REST_INVALID_JOBS_DESC", ValidationFailed, "Jobs description entry not found, empty or not dictionary or list"),
    errno(9003, "ESLURM_REST_EMPTY_RESULT", ResourceNotFound, "Nothing found with query"),
    errno(9004, "ESLURM_REST_MISSING_UID", AuthenticationFailed, "Missing UNIX user in request"),
];

/// Table entry for a Slurm error number, if known.
pub fn slurm_errno(number: i32) -> Option<&'static SlurmErrno> {
    SLURM_ERRNOS.iter().find(|e| e.number == number)
}

/// Symbolic name of a Slurm error number, if known.
pub fn slurm_error_name(number: i32) -> Option<&'static str> {
    slurm_errno(number).map(|e| e.name)
}

/// `"<description> (<NAME>)"` for a known error number; `message` otherwise.
pub fn enhance_message(number: i32, message: &str) -> String {
    slurm_errno(number)
        .map(SlurmErrno::message)
        .unwrap_or_else(|| message.to_string())
}

/// Normalize one HTTP exchange.
///
/// A 2xx status is success regardless of body. Otherwise the first entry of
/// the body's `errors` array supplies the message and every entry is kept in
/// [`Error::details`]; without a structured body the message falls back to
/// wording keyed on the status code.
pub fn normalize(status: u16, body: &[u8], operation: &str) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let details = parse_details(body);
    let mut kind = ErrorKind::from_status(status);

    // Slurm reports some lookups as 500 with an errno that says "not found".
    if matches!(
        kind,
        ErrorKind::ServerError | ErrorKind::ValidationFailed | ErrorKind::Unknown
    ) {
        if let Some(errno) = details.first().and_then(|d| slurm_errno(d.error_number)) {
            kind = errno.kind;
        }
    }

    let message = details
        .first()
        .and_then(detail_message)
        .unwrap_or_else(|| fallback_message(status, operation));

    Err(Error::Api {
        kind,
        operation: operation.to_string(),
        version: None,
        status,
        message,
        details,
    })
}

/// [`normalize`] with the backend version attached to the error.
pub fn normalize_for_version(
    status: u16,
    body: &[u8],
    operation: &str,
    version: &str,
) -> Result<()> {
    normalize(status, body, operation).map_err(|e| e.with_version(version))
}

/// slurmrestd sometimes answers 200 with a populated `errors` array.
/// Surface that as a server error instead of decoding a partial payload.
pub fn check_embedded_errors(status: u16, body: &[u8], operation: &str) -> Result<()> {
    let details = parse_details(body);
    let Some(first) = details.first() else {
        return Ok(());
    };

    let kind = slurm_errno(first.error_number)
        .map(|e| e.kind)
        .unwrap_or(ErrorKind::ServerError);
    let message = detail_message(first).unwrap_or_else(|| "server error".to_string());

    Err(Error::Api {
        kind,
        operation: operation.to_string(),
        version: None,
        status,
        message,
        details,
    })
}

fn parse_details(body: &[u8]) -> Vec<ApiErrorDetail> {
    if body.is_empty() {
        return Vec::new();
    }
    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
        return Vec::new();
    };

    if !envelope.errors.is_empty() {
        return envelope.errors.into_iter().map(into_detail).collect();
    }

    match envelope.error {
        Some(serde_json::Value::String(message)) if !message.is_empty() => {
            vec![ApiErrorDetail {
                error_number: envelope.code.unwrap_or(-1),
                error_code: String::new(),
                description: message,
                source: String::new(),
            }]
        }
        _ => Vec::new(),
    }
}

fn into_detail(entry: WireErrorEntry) -> ApiErrorDetail {
    let error_number = entry.error_number.unwrap_or(-1);
    let error_code = entry
        .error_code
        .filter(|c| !c.is_empty())
        .or_else(|| slurm_error_name(error_number).map(str::to_string))
        .or_else(|| entry.error.clone().filter(|e| !e.is_empty()))
        .unwrap_or_default();
    let description = entry
        .description
        .filter(|d| !d.is_empty())
        .or(entry.error)
        .filter(|d| !d.is_empty())
        .or_else(|| slurm_errno(error_number).map(SlurmErrno::message))
        .unwrap_or_default();

    ApiErrorDetail {
        error_number,
        error_code,
        description,
        source: entry.source.unwrap_or_default(),
    }
}

fn detail_message(detail: &ApiErrorDetail) -> Option<String> {
    if !detail.description.is_empty() {
        Some(detail.description.clone())
    } else if !detail.error_code.is_empty() {
        Some(detail.error_code.clone())
    } else {
        None
    }
}

fn fallback_message(status: u16, operation: &str) -> String {
    match status {
        401 => "Authentication failed".to_string(),
        403 => "Permission denied".to_string(),
        404 => "resource not found".to_string(),
        409 => "resource conflict".to_string(),
        422 => "validation failed".to_string(),
        500..=599 => "server error".to_string(),
        _ => format!("{} failed with status {}", operation, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200)]
    #[case(201)]
    #[case(204)]
    fn test_success_statuses(#[case] status: u16) {
        assert!(normalize(status, b"", "ListJobs").is_ok());
        assert!(normalize(status, b"{\"errors\":[{\"error\":\"x\"}]}", "ListJobs").is_ok());
    }

    #[rstest]
    #[case(401, ErrorKind::AuthenticationFailed, "Authentication failed")]
    #[case(403, ErrorKind::AuthenticationFailed, "Permission denied")]
    #[case(404, ErrorKind::ResourceNotFound, "resource not found")]
    #[case(409, ErrorKind::ResourceConflict, "resource conflict")]
    #[case(422, ErrorKind::ValidationFailed, "validation failed")]
    #[case(500, ErrorKind::ServerError, "server error")]
    #[case(502, ErrorKind::ServerError, "server error")]
    #[case(418, ErrorKind::Unknown, "GetNode failed with status 418")]
    fn test_fallback_messages(
        #[case] status: u16,
        #[case] kind: ErrorKind,
        #[case] message: &str,
    ) {
        let err = normalize(status, b"", "GetNode").unwrap_err();
        assert_eq!(err.kind(), kind);
        match err {
            Error::Api { message: m, .. } => assert_eq!(m, message),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"not json".as_slice())]
    #[case(b"{\"errors\":[]}".as_slice())]
    #[case(b"{\"errors\":[{\"error_number\":2017,\"description\":\"Invalid job id\"}]}".as_slice())]
    fn test_404_is_always_not_found(#[case] body: &[u8]) {
        let err = normalize(404, body, "GetJob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_first_entry_wins_and_all_kept() {
        let body = br#"{
            "meta": {"plugin": {"type": "openapi/slurmctld"}},
            "errors": [
                {"error_number": 9001, "error": "Failure to parse", "description": "Unable to parse partition", "source": "_parse"},
                {"error_number": 9002, "error": "Second", "description": "ignored for message", "source": "x"}
            ]
        }"#;
        let err = normalize(400, body, "SubmitJob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.details().len(), 2);
        match &err {
            Error::Api { message, .. } => assert_eq!(message, "Unable to parse partition"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.details()[0].error_code, "ESLURM_REST_FAIL_PARSING");
        assert_eq!(err.details()[1].description, "ignored for message");
    }

    #[test]
    fn test_errno_refines_server_error() {
        let body = br#"{"errors":[{"error_number":2017,"error":"Invalid job id specified"}]}"#;
        let err = normalize(500, body, "GetJob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.details()[0].error_code, "ESLURM_INVALID_JOB_ID");
        assert_eq!(err.details()[0].description, "Invalid job id specified");
    }

    #[rstest]
    #[case(500, 2045, ErrorKind::ResourceNotFound, "ESLURM_INVALID_ACCOUNT")]
    #[case(500, 2066, ErrorKind::ResourceNotFound, "ESLURM_INVALID_QOS")]
    #[case(500, 2053, ErrorKind::ResourceNotFound, "ESLURM_RESERVATION_INVALID")]
    #[case(400, 2082, ErrorKind::ResourceConflict, "ESLURM_RESERVATION_NAME_DUP")]
    #[case(500, 7001, ErrorKind::ResourceConflict, "ESLURM_JOBS_RUNNING_ON_ASSOC")]
    #[case(500, 7011, ErrorKind::ResourceConflict, "ESLURM_NO_REMOVE_DEFAULT_QOS")]
    #[case(500, 6000, ErrorKind::AuthenticationFailed, "ESLURM_AUTH_CRED_INVALID")]
    #[case(422, 2010, ErrorKind::ValidationFailed, "ESLURM_USER_ID_MISSING")]
    #[case(500, 7000, ErrorKind::ServerError, "ESLURM_DB_CONNECTION")]
    fn test_errno_table(
        #[case] status: u16,
        #[case] number: i32,
        #[case] kind: ErrorKind,
        #[case] name: &str,
    ) {
        let body = format!(r#"{{"errors":[{{"error_number":{number}}}]}}"#);
        let err = normalize(status, body.as_bytes(), "DeleteQos").unwrap_err();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.details()[0].error_code, name);
        // No wire wording: the table's description names the code.
        assert!(err.to_string().contains(name), "{err}");
    }

    #[test]
    fn test_errno_does_not_override_specific_status() {
        let body = br#"{"errors":[{"error_number":2066,"error":"Invalid qos"}]}"#;
        let err = normalize(403, body, "UpdateQos").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
        assert_eq!(err.details()[0].description, "Invalid qos");
    }

    #[test]
    fn test_enhance_message() {
        assert_eq!(
            enhance_message(2017, "boom"),
            "Invalid job id specified (ESLURM_INVALID_JOB_ID)"
        );
        assert_eq!(enhance_message(4242, "boom"), "boom");
        assert_eq!(slurm_errno(2045).map(|e| e.kind), Some(ErrorKind::ResourceNotFound));
        assert!(SLURM_ERRNOS.len() >= 40);
        let mut numbers: Vec<_> = SLURM_ERRNOS.iter().map(|e| e.number).collect();
        numbers.dedup();
        assert_eq!(numbers.len(), SLURM_ERRNOS.len());
    }

    #[test]
    fn test_simple_error_body() {
        let body = br#"{"error": "upstream unavailable", "code": 503}"#;
        let err = normalize(503, body, "Ping").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.details()[0].error_number, 503);
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[test]
    fn test_normalize_for_version() {
        let err = normalize_for_version(409, b"", "CreateAccount", "v0.0.43").unwrap_err();
        assert_eq!(err.version(), Some("v0.0.43"));
        assert_eq!(
            err.to_string(),
            "CreateAccount: resource conflict (status 409, API v0.0.43)"
        );
    }

    #[test]
    fn test_check_embedded_errors() {
        assert!(check_embedded_errors(200, b"{\"jobs\":[],\"errors\":[]}", "ListJobs").is_ok());
        assert!(check_embedded_errors(200, b"", "ListJobs").is_ok());

        let body = br#"{"jobs":[],"errors":[{"error":"Zero Bytes were transmitted or received"}]}"#;
        let err = check_embedded_errors(200, body, "ListJobs").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.status(), Some(200));
    }
}
