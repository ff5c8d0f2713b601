//! Accounts that transactions belong to.
//!
//! Accounts are only ever created as a side channel from within the
//! transaction form; there is no account page or account sheet.

mod db;
mod domain;

pub use db::{create_account, create_account_table, get_all_accounts};
pub use domain::{Account, AccountName};
