//! Response envelope handling

use serde_json::Value;

use super::error::{ApiError, ApiResult};
use super::transport::RawResponse;

/// Normalize a raw response.
///
/// A body that is not JSON counts as no body. On a non-success status the
/// error message comes from `detail`: used as-is when it is a string, JSON
/// encoded otherwise, and a generic status message when absent.
pub fn handle_response(response: RawResponse) -> ApiResult<Option<Value>> {
    let data: Option<Value> = serde_json::from_str(&response.body).ok();

    if !response.is_success() {
        return Err(ApiError::Request {
            status: response.status,
            message: error_message(response.status, data.as_ref()),
        });
    }

    Ok(data)
}

fn error_message(status: u16, data: Option<&Value>) -> String {
    match data.and_then(|d| d.get("detail")) {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(detail) if is_present(detail) => detail.to_string(),
        _ => format!("Request failed with status {}", status),
    }
}

// `null`, `false`, `0` and `""` count as an absent detail.
fn is_present(detail: &Value) -> bool {
    match detail {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
