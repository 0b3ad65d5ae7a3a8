//! Fallback policy shared by the feature facades.
//!
//! Read and generate paths favour availability and swallow errors into mock
//! payloads; persistence paths for video favour correctness and propagate.
//! Swallowed errors are emitted as structured `warn!` events and counted, so a
//! deployment in "demo mode" is visible to operators.

use clipstudio_models::DeleteAck;
use serde_json::Value;
use tracing::{error, warn};

use crate::endpoints::Domain;
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_fallback;

/// Return the value, or log the error and substitute `mock()`.
pub(crate) fn or_mock<T>(
    domain: Domain,
    operation: &str,
    result: ApiResult<T>,
    mock: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(
                domain = %domain,
                operation = %operation,
                cause = %e.cause(),
                status = ?e.http_status(),
                fallback = "mock",
                "{} {} failed, using mock data: {}",
                domain,
                operation,
                e
            );
            record_fallback(domain.as_str(), operation, e.cause().as_str());
            mock()
        }
    }
}

/// Propagate any error after logging it.
pub(crate) fn strict<T>(domain: Domain, operation: &str, result: ApiResult<T>) -> ApiResult<T> {
    result.map_err(|e| {
        error!(
            domain = %domain,
            operation = %operation,
            cause = %e.cause(),
            status = ?e.http_status(),
            "{} {} failed: {}",
            domain,
            operation,
            e
        );
        e
    })
}

/// Interpret a delete response. An empty 2xx body counts as success.
pub(crate) fn delete_ack(body: Value, id: &str) -> ApiResult<DeleteAck> {
    let mut ack = match body {
        Value::Null => DeleteAck {
            success: true,
            message: String::new(),
            id: String::new(),
        },
        other => serde_json::from_value(other)
            .map_err(|e| ApiError::Decode(format!("delete {}: {}", id, e)))?,
    };
    if ack.id.is_empty() {
        ack.id = id.to_string();
    }
    Ok(ack)
}
