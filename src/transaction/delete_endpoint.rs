//! Defines the endpoint for deleting a transaction.
//!
//! The edit sheet's delete button and the table's row actions both hit this
//! endpoint. The success response is the same for both: an empty sheet root
//! plus a `transactions-changed` event, which makes the table refetch itself.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    sheet::{TRANSACTIONS_CHANGED, close_and_invalidate},
    transaction::db::delete_transaction,
};

/// The state needed for deleting a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete the transaction with `transaction_id`.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<DeleteTransactionState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(_) => close_and_invalidate([TRANSACTIONS_CHANGED]),
        Err(Error::DeleteMissingTransaction) => {
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        account::{AccountName, create_account},
        db::initialize,
        sheet::TRANSACTIONS_CHANGED,
        test_utils::{get_header, parse_html_fragment},
        transaction::{NewTransaction, create_transaction, get_transaction},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_state() -> DeleteTransactionState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction_and_invalidates_list() {
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

        let response = delete_transaction_endpoint(Path(transaction.id), State(state.clone())).await;

        let trigger = get_header(&response, "hx-trigger");
        assert!(trigger.contains(TRANSACTIONS_CHANGED), "got {trigger}");
        assert_eq!(
            Err(Error::NotFound),
            get_transaction(transaction.id, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_renders_alert() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(Path(999), State(state)).await;

        assert!(
            response.headers().get("hx-trigger").is_none(),
            "want no invalidation for a failed delete"
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
