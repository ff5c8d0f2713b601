//! The sheet for editing or deleting an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::{Account, get_all_accounts},
    category::{Category, get_all_categories},
    database_id::TransactionId,
    endpoints,
    html::{BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, loading_spinner},
    sheet::{SHEET_ROOT_TARGET, sheet_shell},
    transaction::{
        db::get_transaction,
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed for rendering the edit transaction sheet.
#[derive(Debug, Clone)]
pub struct EditTransactionSheetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionSheetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the sheet for editing the transaction with `transaction_id`.
pub async fn get_edit_transaction_sheet(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<EditTransactionSheetState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let transaction = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => return Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            return error.into_alert_response();
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
        account_id: Some(transaction.account_id),
        category_id: transaction.category_id,
        amount: Some(transaction.amount),
        date: transaction.date,
        payee: Some(&transaction.payee),
        notes: transaction.notes.as_deref(),
    };

    edit_transaction_sheet_view(transaction_id, &defaults, &accounts, &categories, "")
        .into_response()
}

pub(crate) fn edit_transaction_sheet_view(
    transaction_id: TransactionId,
    defaults: &TransactionFormDefaults<'_>,
    accounts: &[Account],
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION, transaction_id);
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
                    " Save Changes"
                }

                button
                    type="button"
                    hx-delete=(delete_endpoint)
                    hx-confirm="Are you sure? You are about to delete this transaction."
                    hx-target=(SHEET_ROOT_TARGET)
                    hx-swap="innerHTML"
                    hx-target-error="#alert-container"
                    hx-disabled-elt="closest fieldset"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete Transaction"
                }
            }
        }
    };

    sheet_shell("Edit Transaction", "Edit an existing transaction.", &form)
}

#[cfg(test)]
mod edit_transaction_sheet_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        account::{AccountName, create_account},
        category::{CategoryName, create_category},
        db::initialize,
        endpoints,
        test_utils::{assert_form_input_with_value, must_get_form, parse_html_fragment},
        transaction::{NewTransaction, create_transaction},
    };

    use super::{EditTransactionSheetState, get_edit_transaction_sheet};

    fn get_test_state() -> EditTransactionSheetState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        EditTransactionSheetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn prefills_uncategorized_transaction() {
        let state = get_test_state();
        let transaction = {
            let connection = state.db_connection.lock().unwrap();
            let account =
                create_account(AccountName::new_unchecked("Checking"), &connection).unwrap();
            // An unrelated category must not end up selected.
            create_category(CategoryName::new_unchecked("Groceries"), &connection).unwrap();

            create_transaction(
                NewTransaction {
                    account_id: account.id,
                    category_id: None,
                    amount: -500.0,
                    date: date!(2024 - 01 - 01),
                    payee: "Rent".to_string(),
                    notes: None,
                },
                &connection,
            )
            .unwrap()
        };

        let response = get_edit_transaction_sheet(Path(transaction.id), State(state)).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "number", "-500.00");
        assert_form_input_with_value(&form, "date", "date", "2024-01-01");
        assert_form_input_with_value(&form, "payee", "text", "Rent");

        let selected_account_selector =
            Selector::parse("select[name=account_id] option[selected]").unwrap();
        let selected_account = form
            .select(&selected_account_selector)
            .next()
            .expect("the transaction's account should be selected");
        assert_eq!(
            selected_account.text().collect::<String>(),
            "Checking"
        );

        let selected_category_selector =
            Selector::parse("select[name=category_id] option[selected]").unwrap();
        assert!(
            form.select(&selected_category_selector).next().is_none(),
            "an uncategorized transaction should fall back to the Uncategorized option"
        );
    }

    #[tokio::test]
    async fn delete_button_requires_confirmation() {
        let state = get_test_state();
        let transaction = {
            let connection = state.db_connection.lock().unwrap();
            let account =
                create_account(AccountName::new_unchecked("Checking"), &connection).unwrap();

            create_transaction(
                NewTransaction {
                    account_id: account.id,
                    category_id: None,
                    amount: -12.5,
                    date: date!(2024 - 03 - 05),
                    payee: "Cafe".to_string(),
                    notes: None,
                },
                &connection,
            )
            .unwrap()
        };

        let response = get_edit_transaction_sheet(Path(transaction.id), State(state)).await;

        let html = parse_html_fragment(response).await;
        let delete_selector = Selector::parse("button[hx-delete]").unwrap();
        let delete_button = html
            .select(&delete_selector)
            .next()
            .expect("the edit sheet should have a delete button");
        assert_eq!(
            delete_button.attr("hx-delete"),
            Some(endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id).as_str())
        );
        assert!(
            delete_button.attr("hx-confirm").is_some(),
            "deleting must ask for confirmation first"
        );
    }

    #[tokio::test]
    async fn missing_transaction_renders_alert() {
        let state = get_test_state();

        let response = get_edit_transaction_sheet(Path(999), State(state)).await;

        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("[role=alert]").unwrap())
                .next()
                .is_some(),
            "want an alert for a missing transaction"
        );
    }
}
