//! Version selection: build the facade for a version, or find one the
//! server answers to.

use slurmrest_core::{
    ApiRequest, ApiVersion, Error, ErrorKind, RequestContext, Result, Transport, VersionAdapter,
};
use std::sync::Arc;
use tracing::debug;

/// Facade for `version`. Without a transport every call fails with
/// `ClientNotInitialized`.
pub fn adapter_for(
    version: ApiVersion,
    transport: Option<Arc<dyn Transport>>,
) -> Result<Box<dyn VersionAdapter>> {
    let adapter: Box<dyn VersionAdapter> = match version {
        ApiVersion::V0_0_40 => Box::new(slurmrest_v0040::Adapter::new(transport)),
        ApiVersion::V0_0_41 => Box::new(slurmrest_v0041::Adapter::new(transport)),
        ApiVersion::V0_0_42 => Box::new(slurmrest_v0042::Adapter::new(transport)),
        ApiVersion::V0_0_43 => Box::new(slurmrest_v0043::Adapter::new(transport)),
        ApiVersion::V0_0_44 => Box::new(slurmrest_v0044::Adapter::new(transport)),
        other if other.is_legacy() => {
            return Err(Error::NotImplemented {
                operation: "CreateAdapter".to_string(),
                version: other.to_string(),
            });
        }
        other => {
            return Err(Error::validation(
                "CreateAdapter",
                "api_version",
                format!("unsupported API version {}", other),
            ));
        }
    };
    Ok(adapter)
}

/// Probe `GET /slurm/<version>/ping` newest-first and return the first
/// version that answers 2xx.
pub async fn detect_version(
    ctx: &RequestContext,
    transport: &Arc<dyn Transport>,
) -> Result<ApiVersion> {
    let op = "DetectVersion";
    let mut last_error = None;

    for version in ApiVersion::SUPPORTED.iter().rev() {
        if ctx.is_done() {
            return Err(Error::Cancelled {
                operation: op.to_string(),
                version: None,
            });
        }
        let request = ApiRequest::get(format!("/slurm/{}/ping", version));
        match transport.execute(ctx, request).await {
            Ok(response) if response.is_success() => {
                debug!("Detected slurmrestd API {}", version);
                return Ok(*version);
            }
            Ok(response) => {
                debug!("API {} answered ping with {}", version, response.status);
                last_error = Some(Error::Api {
                    kind: ErrorKind::from_status(response.status),
                    operation: op.to_string(),
                    version: None,
                    status: response.status,
                    message: format!("no supported API version answered (last tried {})", version),
                    details: Vec::new(),
                });
            }
            Err(source) => {
                debug!("API {} ping failed: {}", version, source);
                last_error = Some(Error::Transport {
                    operation: op.to_string(),
                    version: None,
                    source,
                });
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::NotImplemented {
        operation: op.to_string(),
        version: "none".to_string(),
    }))
}
