//! Static assets compiled into the binary

use axum::{
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
    Router,
};

const SCRIPT: &str = include_str!("../../../static/js/script.js");
const STYLE: &str = include_str!("../../../static/css/style.css");

/// GET /static/js/script.js
async fn script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], SCRIPT)
}

/// GET /static/css/style.css
async fn style() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLE)
}

/// Asset routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/static/js/script.js", get(script))
        .route("/static/css/style.css", get(style))
}
