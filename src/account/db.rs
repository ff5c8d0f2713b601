//! Database operations for accounts.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    account::{Account, AccountName},
};

/// Create an account and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::DuplicateAccountName] if an account with the same name
/// already exists.
pub fn create_account(name: AccountName, connection: &Connection) -> Result<Account, Error> {
    connection
        .execute("INSERT INTO account (name) VALUES (?1);", (name.as_ref(),))
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Error::DuplicateAccountName(name.to_string())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Account { id, name })
}

/// Retrieve all accounts ordered alphabetically by name.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare("SELECT id, name FROM account ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_account| maybe_account.map_err(|error| error.into()))
        .collect()
}

/// Initialize the account table.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = AccountName::new_unchecked(&raw_name);

    Ok(Account { id, name })
}
