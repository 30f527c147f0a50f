//! Record listing: GET /view_data (HTML) and GET /api/data (JSON)

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{clear_consumed_flashes, failure_message, take_flashes, LOAD_FAILED};
use crate::flash::Flash;
use crate::http::error::ApiError;
use crate::http::render;
use crate::http::server::AppState;
use crate::records::Record;

/// JSON listing response
#[derive(Serialize)]
pub struct DataResponse {
    pub data: Vec<Record>,
}

/// GET /view_data - list every stored record
///
/// A storage failure still renders the page, with an empty table and an
/// error message.
async fn view_data(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let mut flashes = take_flashes(&state.flash, &headers);

    let records = match state.store.list_all().await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "records not loaded");
            flashes.push(Flash::danger(failure_message(LOAD_FAILED, &e)));
            Vec::new()
        }
    };

    let mut response = Html(render::view_data_page(&records, &flashes)).into_response();
    clear_consumed_flashes(&headers, &mut response);
    response
}

/// GET /api/data - every stored record as JSON
async fn api_data(State(state): State<Arc<AppState>>) -> Result<Json<DataResponse>, ApiError> {
    let data = state.store.list_all().await?;
    Ok(Json(DataResponse { data }))
}

/// Record routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/view_data", get(view_data))
        .route("/api/data", get(api_data))
}
