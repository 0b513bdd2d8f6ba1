use log::debug;
use rocket::http::Status;
use rocket::response::content;
use rocket::serde::json::{self, json, Json, Value};
use rocket::{Catcher, Route, State};
use serde::{Deserialize, Serialize};

use telemetry::Measure;

use crate::config::CalculatorConfig;
use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../static/index.html");

lazy_static! {
    static ref CALCULATE_MEASURE: Measure = Measure::new("controller", "calculate");
}

#[derive(Debug, Deserialize)]
struct CalculateRequest {
    #[serde(default)]
    expression: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct CalculateResponse {
    pub result: String,
}

#[get("/")]
fn index() -> content::RawHtml<&'static str> {
    content::RawHtml(INDEX_HTML)
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, Status> {
    telemetry::encode().map_err(|_| Status::InternalServerError)
}

#[post("/calculate", data = "<request>")]
async fn calculate(
    request: Result<Json<CalculateRequest>, json::Error<'_>>,
    config: &State<CalculatorConfig>,
) -> Result<Json<CalculateResponse>, ApiError> {
    CALCULATE_MEASURE
        .stats(async move {
            let request = request?;
            let text = request.expression.as_deref().unwrap_or_default();
            if text.is_empty() {
                return Ok(Json(CalculateResponse {
                    result: "0".to_string(),
                }));
            }

            if text.chars().count() > config.max_expression_length {
                return Err(ApiError::ExpressionTooLong(config.max_expression_length));
            }

            let value = expression::evaluate_expression(text)?;
            debug!("Evaluated {:?} = {}", text, value);

            Ok(Json(CalculateResponse {
                result: value.to_string(),
            }))
        })
        .await
}

// Nothing is persisted yet
#[get("/history")]
fn history() -> Value {
    json!({ "history": [] })
}

#[catch(400)]
fn bad_request() -> ApiError {
    ApiError::InvalidRequest(Status::BadRequest)
}

#[catch(422)]
fn unprocessable_entity() -> ApiError {
    ApiError::InvalidRequest(Status::UnprocessableEntity)
}

pub fn routes() -> Vec<Route> {
    routes![index, status, metrics, calculate, history]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![bad_request, unprocessable_entity]
}
