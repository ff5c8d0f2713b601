//! Defines the endpoint for updating a category from the edit category sheet.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryName, domain::CategoryFormData, edit_category_sheet_view, update_category},
    database_id::CategoryId,
    sheet::{CATEGORIES_CHANGED, TRANSACTIONS_CHANGED, close_and_invalidate},
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the edit category sheet's form submission.
///
/// A rename also invalidates the transactions list since rows there display
/// category names.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return edit_category_sheet_view(category_id, &form.name, &format!("Error: {error}"))
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

    match update_category(category_id, name, &connection) {
        Ok(_) => close_and_invalidate([CATEGORIES_CHANGED, TRANSACTIONS_CHANGED]),
        Err(Error::DuplicateCategoryName(name)) => edit_category_sheet_view(
            category_id,
            &name,
            &format!("A category named \"{name}\" already exists."),
        )
        .into_response(),
        Err(Error::UpdateMissingCategory) => Error::UpdateMissingCategory.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
