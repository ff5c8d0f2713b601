//! Defines the endpoint for creating a category from within the transaction
//! form.
//!
//! Works the same way as the inline account endpoint: the transaction sheet
//! stays open and the category select is refreshed with the new category
//! chosen. The category table on the categories page picks up the addition
//! through the `categories-changed` event.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxResponseTrigger;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::{CategoryName, create_category, get_all_categories},
    sheet::CATEGORIES_CHANGED,
    transaction::form::category_field,
};

/// The state needed for creating a category inline.
#[derive(Debug, Clone)]
pub struct CategoryOptionsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryOptionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a category from the transaction form.
#[derive(Debug, Deserialize)]
pub struct CategoryOptionForm {
    #[serde(default)]
    pub new_category_name: String,
}

/// Create a category and return the refreshed category select with the new
/// category chosen.
pub async fn create_category_option_endpoint(
    State(state): State<CategoryOptionsState>,
    Form(form): Form<CategoryOptionForm>,
) -> Response {
    let name = match CategoryName::new(&form.new_category_name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let category = match create_category(name, &connection) {
        Ok(category) => category,
        Err(error @ Error::DuplicateCategoryName(_)) => return error.into_alert_response(),
        Err(error) => {
            tracing::error!("could not create category: {error}");
            return error.into_alert_response();
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => (
            HxResponseTrigger::normal([CATEGORIES_CHANGED.to_string()]),
            category_field(&categories, Some(category.id)),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve categories: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod category_options_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        category::create_category_table,
        sheet::CATEGORIES_CHANGED,
        test_utils::{assert_status_ok, get_header, parse_html_fragment},
    };

    use super::{CategoryOptionForm, CategoryOptionsState, create_category_option_endpoint};

    fn get_test_state() -> CategoryOptionsState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_category_table(&connection).expect("Could not create category table");

        CategoryOptionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn returns_refreshed_select_and_invalidates_categories() {
        let state = get_test_state();
        let form = CategoryOptionForm {
            new_category_name: "Groceries".to_string(),
        };

        let response = create_category_option_endpoint(State(state), Form(form)).await;

        assert_status_ok(&response);
        let trigger = get_header(&response, "hx-trigger");
        assert!(trigger.contains(CATEGORIES_CHANGED), "got {trigger}");

        let html = parse_html_fragment(response).await;
        let selected_selector =
            Selector::parse("select[name=category_id] option[selected]").unwrap();
        let selected = html
            .select(&selected_selector)
            .next()
            .expect("the new category should be selected");
        assert_eq!(selected.text().collect::<String>(), "Groceries");
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_without_closing_the_sheet() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            crate::category::create_category(
                crate::category::CategoryName::new_unchecked("Groceries"),
                &connection,
            )
            .unwrap();
        }
        let form = CategoryOptionForm {
            new_category_name: "Groceries".to_string(),
        };

        let response = create_category_option_endpoint(State(state), Form(form)).await;

        assert!(
            response.status().is_client_error(),
            "want a client error so htmx routes the alert to the alert container, got {}",
            response.status()
        );
    }
}
