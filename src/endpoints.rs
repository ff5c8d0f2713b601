//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for displaying transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for displaying categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The partial for the transactions table body.
pub const TRANSACTION_TABLE: &str = "/partials/transactions/table";
/// The partial for the sheet that creates a transaction.
pub const NEW_TRANSACTION_SHEET: &str = "/partials/transactions/sheet/new";
/// The partial for the sheet that edits a transaction.
pub const EDIT_TRANSACTION_SHEET: &str = "/partials/transactions/sheet/{transaction_id}";
/// The partial for the categories table body.
pub const CATEGORY_TABLE: &str = "/partials/categories/table";
/// The partial for the sheet that creates a category.
pub const NEW_CATEGORY_SHEET: &str = "/partials/categories/sheet/new";
/// The partial for the sheet that edits a category.
pub const EDIT_CATEGORY_SHEET: &str = "/partials/categories/sheet/{category_id}";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to create a category.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to create a category from within the transaction form and get
/// back the refreshed category select.
pub const CATEGORY_OPTIONS: &str = "/api/transactions/category-options";
/// The route to create an account from within the transaction form and get
/// back the refreshed account select.
pub const ACCOUNT_OPTIONS: &str = "/api/transactions/account-options";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/categories/{category_id}',
/// '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
