//! The fallback page shown when a request fails in a way the client cannot fix.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 500 error page with a short description of what went wrong and a suggested remedy.
pub struct InternalServerError<'a> {
    /// What went wrong, in terms a user can understand.
    pub description: &'a str,
    /// What the user can do about it.
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Something went wrong on our end.",
            fix: "Try again in a moment, or check the server logs.",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

/// Renders the 500 page directly so it can be previewed in a browser.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
