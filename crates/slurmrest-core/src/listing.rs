//! Resilient list conversion.

use crate::convert::ConversionError;
use crate::version::ApiVersion;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Decode and convert each raw record on its own.
///
/// A record that fails to decode or convert is logged and skipped; the rest
/// of the page is still returned.
pub fn convert_records<W, D>(
    records: Vec<Value>,
    entity: &str,
    version: ApiVersion,
    convert: impl Fn(&W) -> Result<D, ConversionError>,
) -> Vec<D>
where
    W: DeserializeOwned,
{
    let total = records.len();
    let mut converted = Vec::with_capacity(total);

    for (index, raw) in records.into_iter().enumerate() {
        let wire: W = match serde_json::from_value(raw) {
            Ok(wire) => wire,
            Err(e) => {
                warn!(
                    "Skipping malformed {} record {} (API {}): {}",
                    entity, index, version, e
                );
                continue;
            }
        };
        match convert(&wire) {
            Ok(item) => converted.push(item),
            Err(e) => warn!(
                "Skipping {} record {} (API {}): {}",
                entity, index, version, e
            ),
        }
    }

    if converted.len() < total {
        debug!(
            "Converted {} of {} {} records (API {})",
            converted.len(),
            total,
            entity,
            version
        );
    }
    converted
}
