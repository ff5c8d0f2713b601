//! Defines the endpoint for deleting a category.
//!
//! Deletion is reachable from two places, the edit category sheet and the
//! category table's row actions. Both issue the same request, so the success
//! response is shared: an empty sheet root plus invalidation events. The
//! table subscribes to those events and refetches itself, which removes the
//! deleted row regardless of which control started the request.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::delete_category,
    database_id::CategoryId,
    sheet::{CATEGORIES_CHANGED, TRANSACTIONS_CHANGED, close_and_invalidate},
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete the category with `category_id`.
///
/// Transactions referencing the category keep their rows and become
/// uncategorized, so the transactions list is invalidated as well.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<DeleteCategoryState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_category(category_id, &connection) {
        Ok(_) => close_and_invalidate([CATEGORIES_CHANGED, TRANSACTIONS_CHANGED]),
        Err(Error::DeleteMissingCategory) => Error::DeleteMissingCategory.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
