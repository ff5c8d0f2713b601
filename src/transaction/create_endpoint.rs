//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
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
    sheet::{TRANSACTIONS_CHANGED, close_and_invalidate},
    transaction::{
        db::create_transaction,
        domain::TransactionFormData,
        form::TransactionFormDefaults,
        new_sheet::new_transaction_sheet_view,
    },
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the new transaction sheet's form submission.
///
/// A validation failure re-renders the sheet with the submitted values and an
/// error message so nothing the user typed is lost.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
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
            return render_sheet_with_error(&form, &format!("Error: {error}"), &connection);
        }
    };

    match create_transaction(new_transaction, &connection) {
        Ok(_) => close_and_invalidate([TRANSACTIONS_CHANGED]),
        Err(Error::InvalidReference) => {
            render_sheet_with_error(&form, "Error: The selected account or category no longer exists.", &connection)
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

fn render_sheet_with_error(
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

    new_transaction_sheet_view(&defaults, &accounts, &categories, error_message).into_response()
}
