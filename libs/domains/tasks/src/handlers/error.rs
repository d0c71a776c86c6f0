use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by every gateway route.
///
/// ```json
/// { "code": 5, "error": "NOT_FOUND", "message": "Task 9999 not found", "details": [] }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// gRPC status code the failure maps to
    pub code: i32,
    /// Machine-readable status name
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Failure of a gateway request: either the RPC call failed, or the HTTP
/// request could not be transcoded into one.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", .0.message())]
    Rpc(tonic::Status),

    #[error("{0}")]
    Decode(String),

    #[error("Malformed RPC response: {0}")]
    Malformed(String),
}

impl From<tonic::Status> for GatewayError {
    fn from(status: tonic::Status) -> Self {
        GatewayError::Rpc(status)
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::Decode(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        GatewayError::Decode(rejection.body_text())
    }
}

impl GatewayError {
    fn code(&self) -> tonic::Code {
        match self {
            GatewayError::Rpc(status) => status.code(),
            GatewayError::Decode(_) => tonic::Code::InvalidArgument,
            GatewayError::Malformed(_) => tonic::Code::Internal,
        }
    }
}

/// Conventional HTTP status for a gRPC code.
pub fn http_status(code: tonic::Code) -> StatusCode {
    use tonic::Code;

    match code {
        Code::Ok => StatusCode::OK,
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            StatusCode::BAD_REQUEST
        }
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists | Code::Aborted => StatusCode::CONFLICT,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        // 499 Client Closed Request
        Code::Cancelled => StatusCode::from_u16(499).unwrap_or(StatusCode::REQUEST_TIMEOUT),
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        Code::Unknown | Code::Internal | Code::DataLoss => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn code_name(code: tonic::Code) -> &'static str {
    use tonic::Code;

    match code {
        Code::Ok => "OK",
        Code::Cancelled => "CANCELLED",
        Code::Unknown => "UNKNOWN",
        Code::InvalidArgument => "INVALID_ARGUMENT",
        Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
        Code::NotFound => "NOT_FOUND",
        Code::AlreadyExists => "ALREADY_EXISTS",
        Code::PermissionDenied => "PERMISSION_DENIED",
        Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
        Code::FailedPrecondition => "FAILED_PRECONDITION",
        Code::Aborted => "ABORTED",
        Code::OutOfRange => "OUT_OF_RANGE",
        Code::Unimplemented => "UNIMPLEMENTED",
        Code::Internal => "INTERNAL",
        Code::Unavailable => "UNAVAILABLE",
        Code::DataLoss => "DATA_LOSS",
        Code::Unauthenticated => "UNAUTHENTICATED",
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = http_status(code);

        if status.is_server_error() {
            tracing::error!(grpc_code = ?code, http_status = %status, message = %self, "Gateway request failed");
        } else {
            tracing::debug!(grpc_code = ?code, http_status = %status, message = %self, "Gateway request rejected");
        }

        let body = ErrorResponse {
            code: code as i32,
            error: code_name(code).to_string(),
            message: self.to_string(),
            details: Vec::new(),
        };

        (status, Json(body)).into_response()
    }
}
