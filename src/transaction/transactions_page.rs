//! The transactions listing page and its table partial.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    account::get_all_accounts,
    category::get_all_categories,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    sheet::{SHEET_ROOT_TARGET, SheetQuery, SheetSelection, closed, sheet_root},
    transaction::{
        db::{TransactionRow, get_transaction, get_transaction_rows},
        edit_sheet::edit_transaction_sheet_view,
        form::TransactionFormDefaults,
        new_sheet::new_transaction_sheet_view,
    },
};

/// The state needed for rendering the transactions page and its table partial.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn transaction_table_view(rows: &[TransactionRow]) -> Markup {
    let table_row = |row: &TransactionRow| {
        let edit_endpoint = endpoints::format_endpoint(
            endpoints::EDIT_TRANSACTION_SHEET,
            row.transaction.id,
        );
        let delete_endpoint =
            endpoints::format_endpoint(endpoints::TRANSACTION, row.transaction.id);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (row.transaction.date)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (row.transaction.payee)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    @match &row.category_name {
                        Some(category_name) => {
                            span class=(CATEGORY_BADGE_STYLE)
                            {
                                (category_name)
                            }
                        }
                        None => {
                            span class="text-gray-400 dark:text-gray-500"
                            {
                                "Uncategorized"
                            }
                        }
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (row.account_name)
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (format_currency(row.transaction.amount))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        button
                            hx-get=(edit_endpoint)
                            hx-target=(SHEET_ROOT_TARGET)
                            hx-swap="innerHTML"
                            hx-target-error="#alert-container"
                            class=(LINK_STYLE)
                        {
                            "Edit"
                        }

                        button
                            hx-delete=(delete_endpoint)
                            hx-confirm={
                                "Are you sure? You are about to delete the transaction for '"
                                (row.transaction.payee) "'."
                            }
                            hx-target=(SHEET_ROOT_TARGET)
                            hx-swap="innerHTML"
                            hx-target-error="#alert-container"
                            hx-disabled-elt="this"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    html!(
        div
            id="transaction-table"
            hx-get=(endpoints::TRANSACTION_TABLE)
            hx-trigger="transactions-changed from:body, categories-changed from:body"
            hx-target="this"
            hx-swap="outerHTML"
            class="dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right
                text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payee" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (table_row(row))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center
                                    text-gray-500 dark:text-gray-400"
                            {
                                "No transactions recorded yet. "
                                button
                                    hx-get=(endpoints::NEW_TRANSACTION_SHEET)
                                    hx-target=(SHEET_ROOT_TARGET)
                                    hx-swap="innerHTML"
                                    class=(LINK_STYLE)
                                {
                                    "Add your first transaction"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn transactions_view(rows: &[TransactionRow], initial_sheet: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative"
            {
                div class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    button
                        hx-get=(endpoints::NEW_TRANSACTION_SHEET)
                        hx-target=(SHEET_ROOT_TARGET)
                        hx-swap="innerHTML"
                        class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (transaction_table_view(rows))
            }
        }

        (sheet_root(initial_sheet))
    );

    base("Transactions", &content)
}

/// Resolve the sheet a deep link asked for. An unknown transaction id falls
/// back to no sheet rather than an error page.
fn initial_sheet(selection: SheetSelection, connection: &Connection) -> Result<Markup, Error> {
    let sheet = match selection {
        SheetSelection::Closed => closed(),
        SheetSelection::New => {
            let accounts = get_all_accounts(connection)?;
            let categories = get_all_categories(connection)?;
            let defaults = TransactionFormDefaults {
                account_id: None,
                category_id: None,
                amount: None,
                date: OffsetDateTime::now_utc().date(),
                payee: None,
                notes: None,
            };

            new_transaction_sheet_view(&defaults, &accounts, &categories, "")
        }
        SheetSelection::Edit(transaction_id) => match get_transaction(transaction_id, connection) {
            Ok(transaction) => {
                let accounts = get_all_accounts(connection)?;
                let categories = get_all_categories(connection)?;
                let defaults = TransactionFormDefaults {
                    account_id: Some(transaction.account_id),
                    category_id: transaction.category_id,
                    amount: Some(transaction.amount),
                    date: transaction.date,
                    payee: Some(&transaction.payee),
                    notes: transaction.notes.as_deref(),
                };

                edit_transaction_sheet_view(
                    transaction_id,
                    &defaults,
                    &accounts,
                    &categories,
                    "",
                )
            }
            Err(Error::NotFound) => closed(),
            Err(error) => return Err(error),
        },
    };

    Ok(sheet)
}

/// Route handler for the transactions listing page.
pub async fn get_transactions_page(
    Query(query): Query<SheetQuery>,
    State(state): State<TransactionsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows = get_transaction_rows(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;

    let sheet = initial_sheet(query.selection(), &connection)?;

    Ok(transactions_view(&rows, sheet).into_response())
}

/// Route handler for the transaction table partial.
pub async fn get_transaction_table(
    State(state): State<TransactionsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let rows = get_transaction_rows(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;

    Ok(transaction_table_view(&rows).into_response())
}
