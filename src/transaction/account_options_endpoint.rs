//! Defines the endpoint for creating an account from within the transaction
//! form.
//!
//! The transaction sheet stays open: the response is the refreshed account
//! select with the new account chosen, which htmx swaps in place of the old
//! field.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::{AccountName, create_account, get_all_accounts},
    transaction::form::account_field,
};

/// The state needed for creating an account inline.
#[derive(Debug, Clone)]
pub struct AccountOptionsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountOptionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating an account from the transaction form.
#[derive(Debug, Deserialize)]
pub struct AccountOptionForm {
    #[serde(default)]
    pub new_account_name: String,
}

/// Create an account and return the refreshed account select with the new
/// account chosen.
pub async fn create_account_option_endpoint(
    State(state): State<AccountOptionsState>,
    Form(form): Form<AccountOptionForm>,
) -> Response {
    let name = match AccountName::new(&form.new_account_name) {
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

    let account = match create_account(name, &connection) {
        Ok(account) => account,
        Err(error @ Error::DuplicateAccountName(_)) => return error.into_alert_response(),
        Err(error) => {
            tracing::error!("could not create account: {error}");
            return error.into_alert_response();
        }
    };

    match get_all_accounts(&connection) {
        Ok(accounts) => account_field(&accounts, Some(account.id)).into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve accounts: {error}");
            error.into_alert_response()
        }
    }
}
