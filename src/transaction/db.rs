//! Database queries for transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::domain::{NewTransaction, Transaction},
};

/// A transaction joined with the names its table row displays.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub account_name: String,
    pub category_name: Option<String>,
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidReference] if the account or category ID does not refer
///   to an existing row,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\" (account_id, category_id, amount, date, payee, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, account_id, category_id, amount, date, payee, notes",
        )?
        .query_row(
            (
                new_transaction.account_id,
                new_transaction.category_id,
                new_transaction.amount,
                new_transaction.date,
                new_transaction.payee,
                new_transaction.notes,
            ),
            map_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidReference,
            error => error.into(),
        })
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, account_id, category_id, amount, date, payee, notes
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_row)?;

    Ok(transaction)
}

/// Retrieve all transactions joined with their account and category names,
/// most recent first.
pub fn get_transaction_rows(connection: &Connection) -> Result<Vec<TransactionRow>, Error> {
    connection
        .prepare(
            "SELECT \"transaction\".id, \"transaction\".account_id,
                \"transaction\".category_id, \"transaction\".amount,
                \"transaction\".date, \"transaction\".payee, \"transaction\".notes,
                account.name, category.name
             FROM \"transaction\"
             INNER JOIN account ON account.id = \"transaction\".account_id
             LEFT JOIN category ON category.id = \"transaction\".category_id
             ORDER BY \"transaction\".date DESC, \"transaction\".id DESC;",
        )?
        .query_map([], |row| {
            let transaction = map_row(row)?;
            let account_name = row.get(7)?;
            let category_name = row.get(8)?;

            Ok(TransactionRow {
                transaction,
                account_name,
                category_name,
            })
        })?
        .map(|maybe_row| maybe_row.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the transaction `id` with the fields in `new_transaction`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - [Error::InvalidReference] if the account or category ID does not refer
///   to an existing row,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE \"transaction\"
             SET account_id = ?1, category_id = ?2, amount = ?3, date = ?4, payee = ?5, notes = ?6
             WHERE id = ?7",
            (
                new_transaction.account_id,
                new_transaction.category_id,
                new_transaction.amount,
                new_transaction.date,
                new_transaction.payee,
                new_transaction.notes,
                id,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidReference,
            error => error.into(),
        })?;

    if rows_affected == 0 {
        Err(Error::UpdateMissingTransaction)
    } else {
        Ok(())
    }
}

/// Delete the transaction `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

    if rows_affected == 0 {
        Err(Error::DeleteMissingTransaction)
    } else {
        Ok(())
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id INTEGER NOT NULL,
                category_id INTEGER,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                payee TEXT NOT NULL,
                notes TEXT,
                FOREIGN KEY(account_id) REFERENCES account(id)
                    ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES category(id)
                    ON UPDATE CASCADE ON DELETE SET NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the transactions table's date ordering.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let account_id = row.get(1)?;
    let category_id = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;
    let payee = row.get(5)?;
    let notes = row.get(6)?;

    Ok(Transaction {
        id,
        account_id,
        category_id,
        amount,
        date,
        payee,
        notes,
    })
}
