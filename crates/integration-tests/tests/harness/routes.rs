//! Application routes that fail in every way the boundary has to handle

use anyhow::Context;
use axum::{Json, Router, routing::get};
use faultline_core::DomainError;
use faultline_server::AppError;
use faultline_server::extract::{self, Path};
use serde_json::{Value, json};

pub fn router() -> Router {
    Router::new()
        .route("/campgrounds", get(list_campgrounds).post(create_campground))
        .route("/campgrounds/{id}", get(show_campground))
        .route("/status/{code}", get(raise_status))
        .route("/unclassified", get(unclassified))
        .route("/wrapped", get(wrapped))
        .route("/panic", get(panics))
}

async fn list_campgrounds() -> Json<Value> {
    Json(json!([{ "id": 1, "title": "Pine Hollow" }]))
}

async fn show_campground(Path(id): Path<String>) -> Result<Json<Value>, AppError> {
    let id: u64 = id
        .parse()
        .map_err(|_| DomainError::bad_request(format!("invalid campground id: {id}")))?;

    if id != 1 {
        return Err(DomainError::not_found("Campground not found").into());
    }

    Ok(Json(json!({ "id": id, "title": "Pine Hollow" })))
}

async fn create_campground(extract::Json(body): extract::Json<Value>) -> Result<Json<Value>, AppError> {
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::bad_request("Invalid Campground Data"))?;

    Ok(Json(json!({ "id": 2, "title": title })))
}

async fn raise_status(Path(code): Path<u16>) -> AppError {
    DomainError::new(code, format!("raised {code}")).into()
}

async fn unclassified() -> Result<Json<Value>, AppError> {
    Err(std::io::Error::other("database unreachable").into())
}

async fn wrapped() -> Result<Json<Value>, AppError> {
    let lookup: Result<Json<Value>, DomainError> = Err(DomainError::forbidden("You do not have permission to do that"));
    Ok(lookup.context("loading campground for edit")?)
}

async fn panics() -> Json<Value> {
    panic!("handler exploded")
}
