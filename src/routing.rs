//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_category_table, get_edit_category_sheet, get_new_category_sheet,
        update_category_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{
        create_account_option_endpoint, create_category_option_endpoint,
        create_transaction_endpoint, delete_transaction_endpoint, get_edit_transaction_sheet,
        get_new_transaction_sheet, get_transaction_table, get_transactions_page,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let views = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let partials = Router::new()
        .route(endpoints::TRANSACTION_TABLE, get(get_transaction_table))
        .route(
            endpoints::NEW_TRANSACTION_SHEET,
            get(get_new_transaction_sheet),
        )
        .route(
            endpoints::EDIT_TRANSACTION_SHEET,
            get(get_edit_transaction_sheet),
        )
        .route(endpoints::CATEGORY_TABLE, get(get_category_table))
        .route(endpoints::NEW_CATEGORY_SHEET, get(get_new_category_sheet))
        .route(endpoints::EDIT_CATEGORY_SHEET, get(get_edit_category_sheet));

    let api = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::ACCOUNT_OPTIONS,
            post(create_account_option_endpoint),
        )
        .route(
            endpoints::CATEGORY_OPTIONS,
            post(create_category_option_endpoint),
        );

    views
        .merge(partials)
        .merge(api)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}
