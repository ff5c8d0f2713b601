//! Shared machinery for the slide-over sheets used to create and edit entities.
//!
//! Each list page renders exactly one sheet container, [sheet_root]. Opening a
//! sheet is an `hx-get` of a sheet partial into that container; closing it is
//! swapping the container back to empty. Because there is a single container
//! per page, at most one sheet (and therefore at most one entity id) is ever
//! open at a time.
//!
//! A successful mutation responds with the closed (empty) container content
//! plus an `HX-Trigger` header naming the entity list that went stale. Tables
//! subscribe to those events and refetch their rows. If the user dismissed the
//! sheet while the request was in flight, the response swaps empty over empty,
//! so a late success can never resurrect or alter a closed sheet.

use axum::response::{IntoResponse, Response};
use axum_htmx::HxResponseTrigger;
use maud::{Markup, html};
use serde::Deserialize;

use crate::database_id::DatabaseId;

/// The id of the element that sheet partials are rendered into.
pub const SHEET_ROOT_ID: &str = "sheet-root";

/// CSS selector for [SHEET_ROOT_ID], for use in `hx-target` attributes.
pub const SHEET_ROOT_TARGET: &str = "#sheet-root";

/// Invalidation event fired after a successful transaction mutation.
pub const TRANSACTIONS_CHANGED: &str = "transactions-changed";

/// Invalidation event fired after a successful category mutation.
pub const CATEGORIES_CHANGED: &str = "categories-changed";

/// Which sheet, if any, a list page should render open.
///
/// Parsed from the page query string (`?sheet=new`, `?sheet={id}`) so that a
/// page can load with a sheet already open, e.g. when linking straight to an
/// edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSelection {
    /// No sheet is open.
    Closed,
    /// The create sheet is open. There is no entity id yet.
    New,
    /// The edit sheet is open for the entity with this id.
    Edit(DatabaseId),
}

impl SheetSelection {
    /// Select the edit sheet for `id`.
    pub fn open(id: DatabaseId) -> Self {
        Self::Edit(id)
    }

    /// Clear the selection.
    pub fn close() -> Self {
        Self::Closed
    }

    /// Parse a selection from the raw `sheet` query parameter.
    ///
    /// Anything that is neither `new` nor an integer id is treated as no
    /// selection rather than an error, since the parameter is routing state,
    /// not user data.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Closed,
            Some("new") => Self::New,
            Some(value) => match value.parse::<DatabaseId>() {
                Ok(id) => Self::open(id),
                Err(_) => Self::close(),
            },
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The selected entity id, if the edit sheet is open.
    pub fn id(&self) -> Option<DatabaseId> {
        match self {
            Self::Edit(id) => Some(*id),
            _ => None,
        }
    }
}

/// The query string carrying a page's [SheetSelection].
#[derive(Debug, Default, Deserialize)]
pub struct SheetQuery {
    pub sheet: Option<String>,
}

impl SheetQuery {
    pub fn selection(&self) -> SheetSelection {
        SheetSelection::from_query(self.sheet.as_deref())
    }
}

/// The container that sheet partials are swapped into.
pub fn sheet_root(initial_sheet: Markup) -> Markup {
    html! {
        div id=(SHEET_ROOT_ID)
        {
            (initial_sheet)
        }
    }
}

/// The contents of [sheet_root] when no sheet is open.
pub fn closed() -> Markup {
    html! {}
}

/// The slide-over panel wrapping every sheet's form.
///
/// The backdrop and the close button both clear the sheet root client-side,
/// which is all closing without submitting amounts to.
pub fn sheet_shell(title: &str, description: &str, body: &Markup) -> Markup {
    let close_sheet = format!("document.getElementById('{SHEET_ROOT_ID}').replaceChildren()");

    html! {
        div
            class="fixed inset-0 z-40 bg-gray-900/50"
            onclick=(close_sheet)
        {}

        section
            class="fixed top-0 right-0 z-50 h-screen w-full max-w-md
                overflow-y-auto bg-white p-6 space-y-4 shadow-xl
                text-gray-900 dark:text-white dark:bg-gray-800"
            role="dialog"
            aria-label=(title)
        {
            header class="space-y-1"
            {
                div class="flex items-start justify-between"
                {
                    h2 class="text-lg font-semibold" { (title) }

                    button
                        type="button"
                        aria-label="Close"
                        class="text-gray-400 hover:text-gray-900 dark:hover:text-white"
                        onclick=(close_sheet)
                    {
                        "\u{2715}"
                    }
                }

                p class="text-sm text-gray-500 dark:text-gray-400" { (description) }
            }

            (body)
        }
    }
}

/// The response for a successful mutation: the closed sheet plus an
/// `HX-Trigger` header carrying the invalidation events for the lists the
/// mutation touched.
pub fn close_and_invalidate(events: impl IntoIterator<Item = &'static str>) -> Response {
    let trigger = HxResponseTrigger::normal(events.into_iter().map(String::from));

    (trigger, closed()).into_response()
}


#[cfg(test)]
mod response_tests {
    use axum::body::to_bytes;

    use super::{CATEGORIES_CHANGED, TRANSACTIONS_CHANGED, close_and_invalidate};

    #[tokio::test]
    async fn closes_sheet_and_names_stale_lists() {
        let response = close_and_invalidate([TRANSACTIONS_CHANGED, CATEGORIES_CHANGED]);

        let trigger = response
            .headers()
            .get("hx-trigger")
            .expect("expected response to have the header hx-trigger")
            .to_str()
            .unwrap()
            .to_owned();
        assert!(trigger.contains(TRANSACTIONS_CHANGED), "got {trigger}");
        assert!(trigger.contains(CATEGORIES_CHANGED), "got {trigger}");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty(), "want empty (closed) sheet body");
    }
}

#[cfg(test)]
mod shell_tests {
    use maud::html;
    use scraper::{Html, Selector};

    use super::{SHEET_ROOT_ID, sheet_root, sheet_shell};

    #[test]
    fn shell_has_title_description_and_close_button() {
        let markup = sheet_shell("New Category", "Create a new category.", &html! {});

        let html = Html::parse_fragment(&markup.into_string());
        let dialog = html
            .select(&Selector::parse("section[role=dialog]").unwrap())
            .next()
            .expect("no dialog found");
        let text = dialog.text().collect::<String>();
        assert!(text.contains("New Category"));
        assert!(text.contains("Create a new category."));

        let close_button = dialog
            .select(&Selector::parse("button[aria-label=Close]").unwrap())
            .next()
            .expect("no close button found");
        let onclick = close_button.value().attr("onclick").unwrap_or_default();
        assert!(onclick.contains(SHEET_ROOT_ID));
    }

    #[test]
    fn root_carries_the_swap_target_id() {
        let markup = sheet_root(html! {});

        let html = Html::parse_fragment(&markup.into_string());
        assert!(
            html.select(&Selector::parse(&format!("div#{SHEET_ROOT_ID}")).unwrap())
                .next()
                .is_some()
        );
    }
}
