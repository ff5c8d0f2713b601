//! Defines the endpoint for updating a transaction from the edit sheet.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::get_all_accounts,
    category::get_all_categories,
    database_id::TransactionId,
    sheet::{TRANSACTIONS_CHANGED, close_and_invalidate},
    transaction::{
        db::update_transaction,
        domain::TransactionFormData,
        edit_sheet::edit_transaction_sheet_view,
        form::TransactionFormDefaults,
    },
};

/// The state needed for updating a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the edit transaction sheet's form submission.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<UpdateTransactionState>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_transaction = match form.clone().into_new_transaction() {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            return render_sheet_with_error(
                transaction_id,
                &form,
                &format!("Error: {error}"),
                &connection,
            );
        }
    };

    match update_transaction(transaction_id, new_transaction, &connection) {
        Ok(_) => close_and_invalidate([TRANSACTIONS_CHANGED]),
        Err(Error::UpdateMissingTransaction) => {
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(Error::InvalidReference) => render_sheet_with_error(
            transaction_id,
            &form,
            "Error: The selected account or category no longer exists.",
            &connection,
        ),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn render_sheet_with_error(
    transaction_id: TransactionId,
    form: &TransactionFormData,
    error_message: &str,
    connection: &Connection,
) -> Response {
    let accounts = match get_all_accounts(connection) {
        Ok(accounts) => accounts,
        Err(error) => {
            tracing::error!("Failed to retrieve accounts: {error}");
            return error.into_alert_response();
        }
    };
    let categories = match get_all_categories(connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories: {error}");
            return error.into_alert_response();
        }
    };

    let defaults = TransactionFormDefaults {
        account_id: form.account_id,
        category_id: form.category_id,
        amount: Some(form.amount),
        date: form.date,
        payee: Some(&form.payee),
        notes: form.notes.as_deref(),
    };

    edit_transaction_sheet_view(transaction_id, &defaults, &accounts, &categories, error_message)
        .into_response()
}

#[cfg(test)]
mod update_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        account::{AccountName, create_account},
        category::{CategoryName, create_category},
        db::initialize,
        sheet::TRANSACTIONS_CHANGED,
        test_utils::{
            assert_form_error_message, get_header, must_get_form, parse_html_fragment,
        },
        transaction::{NewTransaction, create_transaction, domain::TransactionFormData,
            get_transaction},
    };

    use super::{UpdateTransactionState, update_transaction_endpoint};

    fn get_test_state() -> UpdateTransactionState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        UpdateTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn updates_transaction_and_invalidates_list() {
        let state = get_test_state();
        let (account, category, transaction) = {
            let connection = state.db_connection.lock().unwrap();
            let account =
                create_account(AccountName::new_unchecked("Checking"), &connection).unwrap();
            let category =
                create_category(CategoryName::new_unchecked("Rent"), &connection).unwrap();
            let transaction = create_transaction(
                NewTransaction {
                    account_id: account.id,
                    category_id: None,
                    amount: -500.0,
                    date: date!(2024 - 01 - 01),
                    payee: "Landlord".to_string(),
                    notes: None,
                },
                &connection,
            )
            .unwrap();

            (account, category, transaction)
        };
        let form = TransactionFormData {
            account_id: Some(account.id),
            category_id: Some(category.id),
            amount: -550.0,
            date: date!(2024 - 02 - 01),
            payee: "Landlord".to_string(),
            notes: None,
        };

        let response =
            update_transaction_endpoint(Path(transaction.id), State(state.clone()), Form(form))
                .await;

        let trigger = get_header(&response, "hx-trigger");
        assert!(trigger.contains(TRANSACTIONS_CHANGED), "got {trigger}");

        let connection = state.db_connection.lock().unwrap();
        let updated = get_transaction(transaction.id, &connection).unwrap();
        assert_eq!(updated.category_id, Some(category.id));
        assert_eq!(updated.amount, -550.0);
        assert_eq!(updated.date, date!(2024 - 02 - 01));
    }

    #[tokio::test]
    async fn missing_account_keeps_sheet_open_with_error() {
        let state = get_test_state();
        let transaction = {
            let connection = state.db_connection.lock().unwrap();
            let account =
                create_account(AccountName::new_unchecked("Checking"), &connection).unwrap();

            create_transaction(
                NewTransaction {
                    account_id: account.id,
                    category_id: None,
                    amount: -500.0,
                    date: date!(2024 - 01 - 01),
                    payee: "Landlord".to_string(),
                    notes: None,
                },
                &connection,
            )
            .unwrap()
        };
        let form = TransactionFormData {
            account_id: None,
            category_id: None,
            amount: -500.0,
            date: date!(2024 - 01 - 01),
            payee: "Landlord".to_string(),
            notes: None,
        };

        let response =
            update_transaction_endpoint(Path(transaction.id), State(state), Form(form)).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Please select an account");
    }

    #[tokio::test]
    async fn updating_missing_transaction_renders_alert() {
        let state = get_test_state();
        let account = {
            let connection = state.db_connection.lock().unwrap();
            create_account(AccountName::new_unchecked("Checking"), &connection).unwrap()
        };
        let form = TransactionFormData {
            account_id: Some(account.id),
            category_id: None,
            amount: -500.0,
            date: date!(2024 - 01 - 01),
            payee: "Landlord".to_string(),
            notes: None,
        };

        let response = update_transaction_endpoint(Path(999), State(state), Form(form)).await;

        assert!(
            response.headers().get("hx-trigger").is_none(),
            "want no invalidation for a failed update"
        );
        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&scraper::Selector::parse("[role=alert]").unwrap())
                .next()
                .is_some(),
            "want an alert for a missing transaction"
        );
    }
}
