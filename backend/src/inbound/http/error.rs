//! HTTP mapping for domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`Error`](crate::domain::Error) into Actix responses here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode};

const TRACE_ID_HEADER: &str = "trace-id";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        // Internal failure details stay in the logs, not in the payload.
        if matches!(self.code, ErrorCode::InternalError) {
            tracing::error!(error = %self.message, "internal error surfaced to client");
            let mut redacted = self.clone();
            redacted.message = "Internal server error".into();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_request("bad"), 400)]
    #[case(Error::unauthorized("no token"), 401)]
    #[case(Error::forbidden("nope"), 403)]
    #[case(Error::not_found("missing"), 404)]
    #[case(Error::conflict("taken"), 409)]
    #[case(Error::internal("boom"), 500)]
    fn status_mapping(#[case] error: Error, #[case] status: u16) {
        assert_eq!(error.status_code().as_u16(), status);
    }

    #[tokio::test]
    async fn internal_errors_are_redacted() {
        let error = Error::internal("connection string leaked");
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], "Internal server error");
        assert_eq!(value["code"], "internal_error");
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let error = Error::not_found("swap not found");
        let response = error.error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["message"], "swap not found");
    }
}
