//! Database initialization.

use rusqlite::Connection;

use crate::{
    Error, account::create_account_table, category::create_category_table,
    transaction::create_transaction_table,
};

/// Create the tables for the domain models if they do not already exist.
///
/// Foreign keys are switched on so that transactions cannot reference missing
/// accounts or categories, and so that deleting a category leaves its
/// transactions uncategorized instead of failing.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    create_account_table(connection)?;
    create_category_table(connection)?;
    create_transaction_table(connection)?;

    Ok(())
}
