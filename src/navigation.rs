//! The navigation bar shared by every full page.

use maud::{Markup, html};

use crate::endpoints;

const ACTIVE_LINK_STYLE: &str = "block py-2 px-3 text-white bg-blue-700 rounded-sm \
    lg:bg-transparent lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500";

const INACTIVE_LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm \
    hover:bg-gray-100 lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 \
    lg:p-0 dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700 \
    dark:hover:text-white lg:dark:hover:bg-transparent";

/// A single entry in the navigation bar.
///
/// At most one link should have `is_current` set at a time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            ACTIVE_LINK_STYLE
        } else {
            INACTIVE_LINK_STYLE
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Build the navigation bar, marking the link matching `active_endpoint` as the
    /// current page.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::TRANSACTIONS_VIEW,
                title: "Transactions",
                is_current: active_endpoint == endpoints::TRANSACTIONS_VIEW,
            },
            Link {
                url: endpoints::CATEGORIES_VIEW,
                title: "Categories",
                is_current: active_endpoint == endpoints::CATEGORIES_VIEW,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900" {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between \
                    mx-auto p-4"
                {
                    a href="/" class="flex items-center space-x-3 rtl:space-x-reverse" {
                        span class="self-center text-2xl font-semibold whitespace-nowrap \
                            dark:text-white"
                        {
                            "Pocketbook"
                        }
                    }

                    div class="w-full lg:block lg:w-auto" {
                        ul class="font-medium flex flex-col p-4 lg:p-0 mt-4 border \
                            border-gray-100 rounded bg-gray-50 lg:flex-row lg:space-x-8 \
                            rtl:space-x-reverse lg:mt-0 lg:border-0 lg:bg-white \
                            dark:bg-gray-800 lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links.into_iter() {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::TRANSACTIONS_VIEW, true);
        cases.insert(endpoints::CATEGORIES_VIEW, true);

        cases.insert(endpoints::ROOT, false);
        cases.insert(endpoints::TRANSACTIONS_API, false);
        cases.insert(endpoints::CATEGORIES_API, false);
        cases.insert(endpoints::INTERNAL_ERROR_VIEW, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current, should_be_active,
                    "want link for {endpoint} active == {should_be_active}, got {}",
                    link.is_current,
                )
            } else {
                assert!(
                    !link.is_current,
                    "want link for inactive page {} to be inactive",
                    link.url
                )
            }
        }
    }
}
