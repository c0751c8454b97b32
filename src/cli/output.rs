//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ProviderStatus { status, .. } => {
            format!("{} (check generation.endpoint; status {})", e, status)
        }
        ApiError::ProviderRequestFailed(_) => {
            format!("{} (is the generation service reachable?)", e)
        }
        _ => e.to_string(),
    }
}
