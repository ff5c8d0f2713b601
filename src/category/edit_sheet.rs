//! The sheet for editing an existing category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_category,
    database_id::CategoryId,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner,
    },
    sheet::{SHEET_ROOT_TARGET, sheet_shell},
};

/// The state needed for the edit category sheet.
#[derive(Debug, Clone)]
pub struct EditCategorySheetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategorySheetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the sheet for editing a category, prefilled with its stored name.
pub async fn get_edit_category_sheet(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategorySheetState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_category(category_id, &connection) {
        Ok(category) => {
            edit_category_sheet_view(category_id, category.name.as_ref(), "").into_response()
        }
        Err(Error::NotFound) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}

pub(crate) fn edit_category_sheet_view(
    category_id: CategoryId,
    name_value: &str,
    error_message: &str,
) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category_id);
    let delete_endpoint = update_endpoint.clone();

    let form = html! {
        form
            hx-put=(update_endpoint)
            hx-target=(SHEET_ROOT_TARGET)
            hx-swap="innerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="find fieldset"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-4"
            {
                div
                {
                    label
                        for="name"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Name"
                    }

                    input
                        id="name"
                        type="text"
                        name="name"
                        placeholder="Category Name"
                        value=(name_value)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if !error_message.is_empty() {
                    p class="text-red-600 dark:text-red-400"
                    {
                        (error_message)
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" { (loading_spinner()) }
                    " Save Changes"
                }

                button
                    type="button"
                    hx-delete=(delete_endpoint)
                    hx-confirm="Are you sure? You are about to delete this category."
                    hx-target=(SHEET_ROOT_TARGET)
                    hx-swap="innerHTML"
                    hx-target-error="#alert-container"
                    hx-disabled-elt="closest fieldset"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete category"
                }
            }
        }
    };

    sheet_shell("Edit Category", "Edit an existing category.", &form)
}
