//! Route handlers organized by page

pub mod assets;
pub mod form;
pub mod health;
pub mod records;

use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::Response;

use crate::db::DbError;
use crate::flash::{self, Flash, FlashSigner, FLASH_COOKIE};

pub const SAVED: &str = "Data saved successfully!";
pub const CONNECTION_FAILED: &str = "Could not connect to the database";
pub const SAVE_FAILED: &str = "Error saving data";
pub const LOAD_FAILED: &str = "Error loading data";

/// User-facing message for a failed storage operation.
///
/// Query failures carry the storage error text; connection failures do not.
pub fn failure_message(prefix: &str, err: &DbError) -> String {
    match err {
        DbError::Connection { .. } => CONNECTION_FAILED.to_string(),
        DbError::Query(e) => format!("{prefix}: {e}"),
    }
}

/// Pending flash messages from the request.
pub fn take_flashes(signer: &FlashSigner, headers: &HeaderMap) -> Vec<Flash> {
    signer.read(headers).unwrap_or_default()
}

/// Expire the flash cookie if the request carried one.
pub fn clear_consumed_flashes(headers: &HeaderMap, response: &mut Response) {
    if flash::cookie_value(headers, FLASH_COOKIE).is_some() {
        response.headers_mut().append(SET_COOKIE, flash::clear_cookie());
    }
}
