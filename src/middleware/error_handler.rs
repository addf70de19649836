use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    http::StatusCode,
    Error, HttpRequest, HttpResponse,
};

/// Build the standard error body used by every endpoint
pub fn error_response(status_code: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status_code).json(serde_json::json!({
        "error": {
            "message": message.into(),
            "code": status_code.as_u16(),
        }
    }))
}

/// Render malformed or mistyped JSON bodies in the standard error format
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let message = format!("Invalid request body: {}", err);
    tracing::warn!(path = %req.path(), error = %err, "Rejected JSON payload");

    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };

    InternalError::from_response(err, error_response(status, message)).into()
}

/// Render unparsable path segments (e.g. a non-numeric id) in the standard error format
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    let message = format!("Invalid path parameter: {}", err);
    tracing::warn!(path = %req.path(), error = %err, "Rejected path parameter");

    InternalError::from_response(err, error_response(StatusCode::BAD_REQUEST, message)).into()
}
