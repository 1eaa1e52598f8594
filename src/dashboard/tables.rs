//! The paginated transactions table shown on the dashboard.

use maud::{Markup, html};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    pagination::{PaginationIndicator, create_pagination_indicators},
    transaction::{PageRequest, Transaction},
};

/// The max number of graphemes to display in the table's description column
/// before truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// One page of the transactions that match the search text.
pub(super) struct TablePage {
    pub transactions: Vec<Transaction>,
    /// The number of matching transactions across all pages.
    pub total: u64,
    pub page: PageRequest,
}

#[derive(Serialize)]
struct DashboardLink<'a> {
    month: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    search: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u64>,
}

/// The dashboard URL for `month`, keeping the current search text.
pub(super) fn dashboard_url(month: &str, search: &str, page: Option<u64>) -> String {
    let link = DashboardLink {
        month,
        search,
        page,
    };

    match serde_urlencoded::to_string(&link) {
        Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
        Err(error) => {
            tracing::error!("could not encode dashboard link: {error}");
            endpoints::DASHBOARD_VIEW.to_owned()
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}

/// Renders the table for one page of the month's matching transactions.
///
/// When nothing matches, an empty state naming the month is shown instead.
pub(super) fn transactions_table(
    month_name: &str,
    search: &str,
    table: &TablePage,
    max_pages: u64,
) -> Markup {
    if table.total == 0 {
        return empty_table_view(month_name, search);
    }

    let page_count = table.page.page_count(table.total);
    let indicators = create_pagination_indicators(table.page.page, page_count, max_pages);

    html! {
        section id="transactions" class="w-full mx-auto mb-8"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Transactions" }

                span class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (table.total) " in " (month_name)
                }
            }

            div class="relative overflow-x-auto shadow-md rounded"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                        }
                    }

                    tbody
                    {
                        @for transaction in &table.transactions {
                            (transaction_row(transaction))
                        }

                        @if table.transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="7" class={ (TABLE_CELL_STYLE) " text-center" }
                                {
                                    "Page " (table.page.page) " is past the last page."
                                }
                            }
                        }
                    }
                }
            }

            (pagination_nav(month_name, search, &indicators))
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (description, full_description) = format_description(&transaction.description);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }

            th scope="row" class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
            {
                (transaction.title)
            }

            td class=(TABLE_CELL_STYLE) title=[full_description] { (description) }

            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(transaction.price)) }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @if transaction.sold { "Yes" } @else { "No" }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(image) = &transaction.image {
                    img
                        src=(image)
                        alt=(transaction.title)
                        loading="lazy"
                        class="w-10 h-10 object-cover rounded";
                }
            }
        }
    }
}

fn pagination_nav(month_name: &str, search: &str, indicators: &[PaginationIndicator]) -> Markup {
    let page_link = |page: u64, text: Markup, style: &str, is_button: bool| {
        let url = dashboard_url(month_name, search, Some(page));

        html! {
            a
                href=(url)
                hx-get=(url)
                hx-target="#dashboard-content"
                hx-swap="outerHTML"
                hx-push-url="true"
                role=[is_button.then_some("button")]
                class=(style)
            {
                (text)
            }
        }
    };

    html! {
        nav class="pagination flex justify-center mt-4" aria-label="Transaction pages"
        {
            ul class="pagination flex items-center gap-x-4"
            {
                @for indicator in indicators {
                    li
                    {
                        @match *indicator {
                            PaginationIndicator::Page(page) => {
                                (page_link(page, html!((page)), LINK_STYLE, false))
                            }
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class="font-bold" { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                "..."
                            }
                            PaginationIndicator::NextButton(page) => {
                                (page_link(page, html!("Next"), BUTTON_SECONDARY_STYLE, true))
                            }
                            PaginationIndicator::BackButton(page) => {
                                (page_link(page, html!("Back"), BUTTON_SECONDARY_STYLE, true))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn empty_table_view(month_name: &str, search: &str) -> Markup {
    html! {
        section id="transactions" class="w-full mx-auto mb-8 text-center"
        {
            h3 class="text-xl font-semibold mb-2" { "Transactions" }

            p data-empty-state="true"
            {
                @if search.trim().is_empty() {
                    "No transactions for " (month_name)
                } @else {
                    "No transactions for " (month_name) " matching \"" (search.trim()) "\""
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::datetime;

    use crate::{
        pagination::PaginationConfig,
        transaction::{PageRequest, Transaction},
    };

    use super::{
        MAX_DESCRIPTION_GRAPHEMES, TablePage, dashboard_url, format_description,
        transactions_table,
    };

    fn transactions(count: i64) -> Vec<Transaction> {
        (1..=count)
            .map(|id| {
                Transaction::build(id, id as f64, datetime!(2022-03-10 12:00 UTC))
                    .title(&format!("Item {id}"))
                    .category("Electronics")
                    .finalise()
            })
            .collect()
    }

    #[test]
    fn dashboard_url_keeps_search_text() {
        assert_eq!(
            dashboard_url("March", "desk lamp", Some(2)),
            "/dashboard?month=March&search=desk+lamp&page=2"
        );
    }

    #[test]
    fn dashboard_url_omits_blank_search() {
        assert_eq!(dashboard_url("May", "", None), "/dashboard?month=May");
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let description = "🎉".repeat(MAX_DESCRIPTION_GRAPHEMES + 1);

        let (got, full) = format_description(&description);

        assert_eq!(got.chars().count(), MAX_DESCRIPTION_GRAPHEMES);
        assert!(got.ends_with("..."));
        assert_eq!(full, Some(description.as_str()));
    }

    #[test]
    fn short_descriptions_are_kept() {
        assert_eq!(format_description("A lamp"), ("A lamp".to_owned(), None));
    }

    #[test]
    fn renders_one_row_per_transaction() {
        let config = PaginationConfig::default();
        let table = TablePage {
            transactions: transactions(3),
            total: 13,
            page: PageRequest::new(1, 3).unwrap(),
        };

        let html = Html::parse_fragment(
            &transactions_table("March", "", &table, config.max_pages).into_string(),
        );

        let rows = Selector::parse("tr[data-transaction-row]").unwrap();
        assert_eq!(html.select(&rows).count(), 3);

        let current = Selector::parse("nav.pagination p[aria-current=page]").unwrap();
        let current_text: String = html
            .select(&current)
            .next()
            .expect("current page indicator missing")
            .text()
            .collect();
        assert_eq!(current_text.trim(), "1");

        let next = Selector::parse("nav.pagination a[role=button]").unwrap();
        let next_link = html.select(&next).next().expect("next button missing");
        assert_eq!(next_link.attr("href"), Some("/dashboard?month=March&page=2"));
    }

    #[test]
    fn empty_table_names_the_month() {
        let table = TablePage {
            transactions: Vec::new(),
            total: 0,
            page: PageRequest::new(1, 10).unwrap(),
        };

        let html = Html::parse_fragment(&transactions_table("March", "", &table, 5).into_string());

        let empty = Selector::parse("p[data-empty-state]").unwrap();
        let text: String = html.select(&empty).next().unwrap().text().collect();
        assert_eq!(text, "No transactions for March");
        assert!(html.select(&Selector::parse("table").unwrap()).next().is_none());
    }
}
