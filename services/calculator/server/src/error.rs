use std::io;

use derive_more::Display;
use log::warn;
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{response, Request};

use expression::ExpressionError;
use telemetry::IsErr;

use crate::api::CalculateResponse;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    InvalidExpression(ExpressionError),

    #[display(fmt = "expression is longer than {} characters", _0)]
    ExpressionTooLong(usize),

    #[display(fmt = "invalid request")]
    InvalidRequest(Status),

    /// A body that could not be read as a calculate request, with the reason
    #[display(fmt = "invalid request")]
    InvalidBody(Status, String),
}

impl From<ExpressionError> for ApiError {
    fn from(e: ExpressionError) -> Self {
        ApiError::InvalidExpression(e)
    }
}

impl From<json::Error<'_>> for ApiError {
    fn from(e: json::Error<'_>) -> Self {
        let status = match &e {
            json::Error::Io(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Status::PayloadTooLarge
            }
            json::Error::Parse(_, parse) if parse.is_data() => Status::UnprocessableEntity,
            _ => Status::BadRequest,
        };
        ApiError::InvalidBody(status, e.to_string())
    }
}

// Every refusal here is caused by the caller's input
impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        false
    }

    fn reason(&self) -> Option<&str> {
        match self {
            ApiError::InvalidExpression(e) => Some(e.kind()),
            ApiError::ExpressionTooLong(_) => Some("expression_too_long"),
            ApiError::InvalidRequest(_) | ApiError::InvalidBody(..) => Some("invalid_request"),
        }
    }
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        // Expression errors are a normal `result` for the page
        let status = match &self {
            ApiError::InvalidRequest(status) | ApiError::InvalidBody(status, _) => *status,
            _ => Status::Ok,
        };
        match &self {
            ApiError::InvalidBody(_, detail) => {
                warn!("Rejected {} {}: {}: {}", req.method(), req.uri(), self, detail)
            }
            _ => warn!("Rejected {} {}: {}", req.method(), req.uri(), self),
        }

        let body = CalculateResponse {
            result: format!("Error: {}", self),
        };
        response::status::Custom(status, Json(body)).respond_to(req)
    }
}
