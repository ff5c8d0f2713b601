//! The fields shared by the new and edit transaction sheets.
//!
//! The account and category selects each live in a wrapper div with a stable
//! id so that the inline "add" endpoints can swap a refreshed select back in
//! without touching the rest of the form.

use maud::{Markup, html};
use time::Date;

use crate::{
    account::Account,
    category::Category,
    database_id::{AccountId, CategoryId},
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The id of the wrapper around the account select.
pub const ACCOUNT_FIELD_ID: &str = "account-field";
/// The id of the wrapper around the category select.
pub const CATEGORY_FIELD_ID: &str = "category-field";

pub struct TransactionFormDefaults<'a> {
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    pub amount: Option<f64>,
    pub date: Date,
    pub payee: Option<&'a str>,
    pub notes: Option<&'a str>,
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    accounts: &[Account],
    categories: &[Category],
) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (account_field(accounts, defaults.account_id))

        (category_field(categories, defaults.category_id))

        div
        {
            label
                for="payee"
                class=(FORM_LABEL_STYLE)
            {
                "Payee"
            }

            input
                name="payee"
                id="payee"
                type="text"
                placeholder="Payee"
                value=[defaults.payee]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="notes"
                class=(FORM_LABEL_STYLE)
            {
                "Notes"
            }

            textarea
                name="notes"
                id="notes"
                placeholder="Optional notes"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @if let Some(notes) = defaults.notes {
                    (notes)
                }
            }
        }
    }
}

/// The account select with its inline "add account" control.
pub fn account_field(accounts: &[Account], selected: Option<AccountId>) -> Markup {
    html! {
        div id=(ACCOUNT_FIELD_ID)
        {
            label
                for="account_id"
                class=(FORM_LABEL_STYLE)
            {
                "Account"
            }

            select
                name="account_id"
                id="account_id"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select an account" }

                @for account in accounts {
                    @if Some(account.id) == selected {
                        option value=(account.id) selected { (account.name) }
                    } @else {
                        option value=(account.id) { (account.name) }
                    }
                }
            }

            div class="flex gap-2 mt-2"
            {
                input
                    name="new_account_name"
                    type="text"
                    placeholder="New account name"
                    class=(FORM_TEXT_INPUT_STYLE);

                button
                    type="button"
                    hx-post=(endpoints::ACCOUNT_OPTIONS)
                    hx-include=(format!("#{ACCOUNT_FIELD_ID}"))
                    hx-target=(format!("#{ACCOUNT_FIELD_ID}"))
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-disabled-elt="this"
                    class="shrink-0 px-3 py-2 text-sm rounded bg-gray-200
                        hover:bg-gray-300 dark:bg-gray-700 dark:hover:bg-gray-600"
                {
                    "Add"
                }
            }
        }
    }
}

/// The category select with its inline "add category" control.
///
/// An empty selection is a valid choice and means the transaction is
/// uncategorized.
pub fn category_field(categories: &[Category], selected: Option<CategoryId>) -> Markup {
    html! {
        div id=(CATEGORY_FIELD_ID)
        {
            label
                for="category_id"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category_id"
                id="category_id"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Uncategorized" }

                @for category in categories {
                    @if Some(category.id) == selected {
                        option value=(category.id) selected { (category.name) }
                    } @else {
                        option value=(category.id) { (category.name) }
                    }
                }
            }

            div class="flex gap-2 mt-2"
            {
                input
                    name="new_category_name"
                    type="text"
                    placeholder="New category name"
                    class=(FORM_TEXT_INPUT_STYLE);

                button
                    type="button"
                    hx-post=(endpoints::CATEGORY_OPTIONS)
                    hx-include=(format!("#{CATEGORY_FIELD_ID}"))
                    hx-target=(format!("#{CATEGORY_FIELD_ID}"))
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-disabled-elt="this"
                    class="shrink-0 px-3 py-2 text-sm rounded bg-gray-200
                        hover:bg-gray-300 dark:bg-gray-700 dark:hover:bg-gray-600"
                {
                    "Add"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        account::{Account, AccountName},
        category::{Category, CategoryName},
        endpoints,
    };

    use super::{TransactionFormDefaults, account_field, category_field, transaction_form_fields};

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                id: 1,
                name: AccountName::new_unchecked("Checking"),
            },
            Account {
                id: 2,
                name: AccountName::new_unchecked("Savings"),
            },
        ]
    }

    fn categories() -> Vec<Category> {
        vec![Category {
            id: 1,
            name: CategoryName::new_unchecked("Groceries"),
        }]
    }

    #[test]
    fn fields_prefill_from_defaults() {
        let defaults = TransactionFormDefaults {
            account_id: Some(2),
            category_id: Some(1),
            amount: Some(-500.0),
            date: date!(2024 - 01 - 01),
            payee: Some("Rent"),
            notes: Some("January"),
        };

        let markup = maud::html! { form { (transaction_form_fields(&defaults, &accounts(), &categories())) } };
        let html = Html::parse_document(&markup.into_string());

        let amount_selector = Selector::parse("input[name=amount]").unwrap();
        let amount = html.select(&amount_selector).next().unwrap();
        assert_eq!(amount.attr("value"), Some("-500.00"));

        let date_selector = Selector::parse("input[name=date]").unwrap();
        let date_input = html.select(&date_selector).next().unwrap();
        assert_eq!(date_input.attr("value"), Some("2024-01-01"));

        let selected_selector = Selector::parse("select[name=account_id] option[selected]").unwrap();
        let selected_account = html.select(&selected_selector).next().unwrap();
        assert_eq!(selected_account.attr("value"), Some("2"));

        let notes_selector = Selector::parse("textarea[name=notes]").unwrap();
        let notes: String = html.select(&notes_selector).next().unwrap().text().collect();
        assert_eq!(notes, "January");
    }

    #[test]
    fn unset_category_defaults_to_uncategorized() {
        let markup = category_field(&categories(), None);
        let html = Html::parse_fragment(&markup.into_string());

        let selected_selector = Selector::parse("option[selected]").unwrap();
        assert!(
            html.select(&selected_selector).next().is_none(),
            "no option should carry an explicit selection"
        );

        let first_option_selector = Selector::parse("option").unwrap();
        let first_option = html.select(&first_option_selector).next().unwrap();
        assert_eq!(first_option.attr("value"), Some(""));
        assert_eq!(first_option.text().collect::<String>(), "Uncategorized");
    }

    #[test]
    fn inline_add_buttons_swap_their_own_field() {
        let markup = account_field(&accounts(), None);
        let html = Html::parse_fragment(&markup.into_string());

        let button_selector = Selector::parse("button[hx-post]").unwrap();
        let button = html.select(&button_selector).next().unwrap();
        assert_eq!(button.attr("hx-post"), Some(endpoints::ACCOUNT_OPTIONS));
        assert_eq!(button.attr("hx-target"), Some("#account-field"));
        assert_eq!(button.attr("hx-swap"), Some("outerHTML"));
        assert_eq!(
            button.attr("type"),
            Some("button"),
            "the add button must not submit the sheet's form"
        );
    }
}
