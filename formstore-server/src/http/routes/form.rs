//! Submission form: GET / and POST /submit

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};

use super::{clear_consumed_flashes, failure_message, take_flashes, SAVED, SAVE_FAILED};
use crate::flash::Flash;
use crate::http::render;
use crate::http::server::AppState;
use crate::records::NewRecord;

/// Submitted form; absent inputs stay `None`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SubmitForm {
    pub input1: Option<String>,
    pub input2: Option<String>,
    pub input3: Option<String>,
}

impl SubmitForm {
    /// Build from decoded `key=value` pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };

        Self {
            input1: first("input1"),
            input2: first("input2"),
            input3: first("input3"),
        }
    }
}

impl From<SubmitForm> for NewRecord {
    fn from(form: SubmitForm) -> Self {
        Self {
            field1: form.input1,
            field2: form.input2,
            field3: form.input3,
        }
    }
}

/// GET / - render the form and any pending messages
async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let flashes = take_flashes(&state.flash, &headers);

    let mut response = Html(render::index_page(&flashes)).into_response();
    clear_consumed_flashes(&headers, &mut response);
    response
}

/// POST /submit - store the record, flash the outcome, redirect home
///
/// An unreadable body (wrong content type, malformed encoding) is treated as
/// a form with every input absent, so the request still ends in a redirect.
async fn submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(pairs)) => SubmitForm::from_pairs(&pairs),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable form body, inputs treated as absent");
            SubmitForm::default()
        }
    };
    let record = NewRecord::from(form);

    let flash = match state.store.insert(&record).await {
        Ok(()) => {
            tracing::info!("record saved");
            Flash::success(SAVED)
        }
        Err(e) => {
            tracing::warn!(error = %e, "record not saved");
            Flash::danger(failure_message(SAVE_FAILED, &e))
        }
    };

    let mut response = Redirect::to("/").into_response();
    if let Some(cookie) = state.flash.set_cookie(&[flash]) {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

/// Form routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/submit", post(submit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_inputs_map_to_null_fields() {
        let form = SubmitForm::from_pairs(&pairs(&[("input1", "a"), ("input3", "")]));

        let record = NewRecord::from(form);
        assert_eq!(record.field1.as_deref(), Some("a"));
        assert_eq!(record.field2, None);
        assert_eq!(record.field3.as_deref(), Some(""));
    }

    #[test]
    fn repeated_key_keeps_first_value() {
        let form = SubmitForm::from_pairs(&pairs(&[
            ("input1", "a"),
            ("input1", "b"),
            ("input2", "b"),
            ("input3", "c"),
        ]));

        assert_eq!(form.input1.as_deref(), Some("a"));
        assert_eq!(form.input2.as_deref(), Some("b"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let form = SubmitForm::from_pairs(&pairs(&[("csrf", "x"), ("input2", "y")]));
        assert_eq!(
            form,
            SubmitForm {
                input1: None,
                input2: Some("y".into()),
                input3: None,
            }
        );
    }
}
