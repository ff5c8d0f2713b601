//! Alert partials for displaying error messages to users.
//!
//! Mutation endpoints render these into the fixed `#alert-container` via the
//! htmx response-targets extension when something goes wrong, so the sheet
//! that triggered the request stays open. Successful mutations close the
//! sheet instead of showing an alert.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable error message.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_markup(self) -> Markup {
        html! {
            div
                class="flex flex-col p-4 mb-4 rounded-lg text-red-800 bg-red-50 \
                    dark:bg-gray-800 dark:text-red-400"
                role="alert"
            {
                span class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    span class="text-sm" { (self.details) }
                }

                button
                    type="button"
                    class="self-end text-sm underline cursor-pointer"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "Dismiss"
                }
            }
        }
    }
}

impl IntoResponse for Alert<'_> {
    fn into_response(self) -> Response {
        self.into_markup().into_response()
    }
}
