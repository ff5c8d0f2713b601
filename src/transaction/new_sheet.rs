//! The sheet for creating a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    account::{Account, get_all_accounts},
    category::{Category, get_all_categories},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, loading_spinner},
    sheet::{SHEET_ROOT_TARGET, sheet_shell},
    transaction::form::{TransactionFormDefaults, transaction_form_fields},
};

/// The state needed for rendering the new transaction sheet.
#[derive(Debug, Clone)]
pub struct NewTransactionSheetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionSheetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the sheet for creating a transaction.
pub async fn get_new_transaction_sheet(
    State(state): State<NewTransactionSheetState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let accounts = match get_all_accounts(&connection) {
        Ok(accounts) => accounts,
        Err(error) => {
            tracing::error!("Failed to retrieve accounts: {error}");
            return error.into_alert_response();
        }
    };
    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories: {error}");
            return error.into_alert_response();
        }
    };

    let defaults = TransactionFormDefaults {
        account_id: None,
        category_id: None,
        amount: None,
        date: OffsetDateTime::now_utc().date(),
        payee: None,
        notes: None,
    };

    new_transaction_sheet_view(&defaults, &accounts, &categories, "").into_response()
}

pub(crate) fn new_transaction_sheet_view(
    defaults: &TransactionFormDefaults<'_>,
    accounts: &[Account],
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let form = html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target=(SHEET_ROOT_TARGET)
            hx-swap="innerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="find fieldset"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-4"
            {
                (transaction_form_fields(defaults, accounts, categories))

                @if !error_message.is_empty() {
                    p class="text-red-600 dark:text-red-400"
                    {
                        (error_message)
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" { (loading_spinner()) }
                    " Create Transaction"
                }
            }
        }
    };

    sheet_shell(
        "New Transaction",
        "Add a new transaction to one of your accounts.",
        &form,
    )
}

#[cfg(test)]
mod new_transaction_sheet_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::{
        account::{AccountName, create_account},
        db::initialize,
        endpoints,
        sheet::SHEET_ROOT_TARGET,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_fragment,
        },
    };

    use super::{NewTransactionSheetState, get_new_transaction_sheet};

    fn get_test_state() -> NewTransactionSheetState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        NewTransactionSheetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_empty_form_with_account_options() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_account(AccountName::new_unchecked("Checking"), &connection).unwrap();
        }

        let response = get_new_transaction_sheet(State(state)).await;

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_hx_endpoint(&form, SHEET_ROOT_TARGET, "hx-target");
        assert_form_input(&form, "date", "date");
        assert_form_input(&form, "payee", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button(&form);

        let option_selector =
            scraper::Selector::parse("select[name=account_id] option").unwrap();
        let options: Vec<String> = form
            .select(&option_selector)
            .map(|option| option.text().collect())
            .collect();
        assert_eq!(options, vec!["Select an account", "Checking"]);
    }
}
