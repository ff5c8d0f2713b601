//! Category management for labelling transactions.
//!
//! Categories are created and edited through slide-over sheets on the
//! categories page, or inline from within the transaction form.

mod categories_page;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod edit_sheet;
mod new_sheet;

pub use categories_page::{get_categories_page, get_category_table};
pub use create_endpoint::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
    update_category,
};
pub use delete_endpoint::delete_category_endpoint;
pub use domain::{Category, CategoryFormData, CategoryName};
pub use edit_endpoint::update_category_endpoint;
pub use edit_sheet::get_edit_category_sheet;
pub use new_sheet::get_new_category_sheet;

pub(crate) use edit_sheet::edit_category_sheet_view;
pub(crate) use new_sheet::new_category_sheet_view;
