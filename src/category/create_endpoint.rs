//! Defines the endpoint for creating a category from the new category sheet.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryName, create_category, domain::CategoryFormData, new_category_sheet_view},
    sheet::{CATEGORIES_CHANGED, close_and_invalidate},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the new category sheet's form submission.
///
/// On success the sheet closes and the categories list is marked stale. On a
/// validation failure the sheet is re-rendered with the entered name and an
/// error message so the user can correct their input.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return new_category_sheet_view(&form.name, &format!("Error: {error}"))
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_category(name, &connection) {
        Ok(_) => close_and_invalidate([CATEGORIES_CHANGED]),
        Err(Error::DuplicateCategoryName(name)) => new_category_sheet_view(
            &name,
            &format!("A category named \"{name}\" already exists."),
        )
        .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_alert_response()
        }
    }
}
