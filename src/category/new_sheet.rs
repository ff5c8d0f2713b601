//! The sheet for creating a category.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    sheet::{SHEET_ROOT_TARGET, sheet_shell},
};

/// Render the sheet for creating a category.
pub async fn get_new_category_sheet() -> Response {
    new_category_sheet_view("", "").into_response()
}

pub(crate) fn new_category_sheet_view(name_value: &str, error_message: &str) -> Markup {
    let form = html! {
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target=(SHEET_ROOT_TARGET)
            hx-swap="innerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="find fieldset"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-4"
            {
                div
                {
                    label
                        for="name"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Name"
                    }

                    input
                        id="name"
                        type="text"
                        name="name"
                        placeholder="e.g. Groceries"
                        value=(name_value)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if !error_message.is_empty() {
                    p class="text-red-600 dark:text-red-400"
                    {
                        (error_message)
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" { (loading_spinner()) }
                    " Create Category"
                }
            }
        }
    };

    sheet_shell(
        "New Category",
        "Create a new category to organize your transactions.",
        &form,
    )
}
