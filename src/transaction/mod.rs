//! Recording and editing transactions.
//!
//! Transactions are created and edited through slide-over sheets on the
//! transactions page. The sheets' account and category selects can create
//! accounts and categories inline without closing the sheet.

mod account_options_endpoint;
mod category_options_endpoint;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod edit_sheet;
mod form;
mod new_sheet;
mod transactions_page;

pub use account_options_endpoint::create_account_option_endpoint;
pub use category_options_endpoint::create_category_option_endpoint;
pub use create_endpoint::create_transaction_endpoint;
pub use db::{create_transaction, create_transaction_table, get_transaction};
pub use delete_endpoint::delete_transaction_endpoint;
pub use domain::NewTransaction;
pub use edit_endpoint::update_transaction_endpoint;
pub use edit_sheet::get_edit_transaction_sheet;
pub use new_sheet::get_new_transaction_sheet;
pub use transactions_page::{get_transaction_table, get_transactions_page};
