//! The categories listing page and its table partial.
//!
//! The table lives in a container that refetches itself whenever a
//! `categories-changed` event reaches the body, so mutations made through the
//! sheets (or the row actions) never leave the table stale.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    category::{
        Category, db::get_categories_with_transaction_counts, edit_category_sheet_view,
        get_category, new_category_sheet_view,
    },
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    sheet::{SHEET_ROOT_TARGET, SheetQuery, SheetSelection, closed, sheet_root},
};

/// The state needed for rendering the categories page and its table partial.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn category_table_view(categories: &[(Category, i64)]) -> Markup {
    let table_row = |category: &Category, transaction_count: i64| {
        let edit_endpoint =
            endpoints::format_endpoint(endpoints::EDIT_CATEGORY_SHEET, category.id);
        let delete_endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category.id);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE)
                    {
                        (category.name)
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (transaction_count)
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
                                "Are you sure? Deleting '" (category.name)
                                "' will uncategorize " (transaction_count)
                                " transaction(s)."
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
            id="category-table"
            hx-get=(endpoints::CATEGORY_TABLE)
            hx-trigger="categories-changed from:body"
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
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            "Name"
                        }
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            "Transactions"
                        }
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            "Actions"
                        }
                    }
                }

                tbody
                {
                    @for (category, transaction_count) in categories {
                        (table_row(category, *transaction_count))
                    }

                    @if categories.is_empty() {
                        tr
                        {
                            td
                                colspan="3"
                                class="px-6 py-4 text-center
                                    text-gray-500 dark:text-gray-400"
                            {
                                "No categories created yet. "
                                button
                                    hx-get=(endpoints::NEW_CATEGORY_SHEET)
                                    hx-target=(SHEET_ROOT_TARGET)
                                    hx-swap="innerHTML"
                                    class=(LINK_STYLE)
                                {
                                    "Create your first category"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn categories_view(categories: &[(Category, i64)], initial_sheet: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative"
            {
                div class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    button
                        hx-get=(endpoints::NEW_CATEGORY_SHEET)
                        hx-target=(SHEET_ROOT_TARGET)
                        hx-swap="innerHTML"
                        class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                (category_table_view(categories))
            }
        }

        (sheet_root(initial_sheet))
    );

    base("Categories", &content)
}

/// Resolve the sheet a deep link asked for. An unknown category id falls back
/// to no sheet rather than an error page.
fn initial_sheet(selection: SheetSelection, connection: &Connection) -> Markup {
    match selection {
        SheetSelection::Closed => closed(),
        SheetSelection::New => new_category_sheet_view("", ""),
        SheetSelection::Edit(category_id) => match get_category(category_id, connection) {
            Ok(category) => edit_category_sheet_view(category.id, category.name.as_ref(), ""),
            Err(_) => closed(),
        },
    }
}

/// Route handler for the categories listing page.
pub async fn get_categories_page(
    Query(query): Query<SheetQuery>,
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories_with_transaction_counts(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let sheet = initial_sheet(query.selection(), &connection);

    Ok(categories_view(&categories, sheet).into_response())
}

/// Route handler for the category table partial.
pub async fn get_category_table(State(state): State<CategoriesPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories_with_transaction_counts(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(category_table_view(&categories).into_response())
}
