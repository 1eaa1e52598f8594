//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and reloading its data
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handlers
//!
//! Every section of the dashboard is built from a single read of the month's
//! transactions. An invalid page only replaces the table with an alert.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::{HX_TRIGGER, HxRequest};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    alert::Alert,
    dashboard::{
        cards::statistics_cards,
        charts::{DashboardChart, category_chart, chart_container, charts_script, price_range_chart},
        tables::{TablePage, dashboard_url, transactions_table},
    },
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
    },
    month::{MONTH_NAMES, month_name, parse_month},
    pagination::PaginationConfig,
    transaction::{
        CategoryCount, PageRequest, PriceRangeCount, SeedConfig, Statistics, calculate_statistics,
        count_by_category, count_by_price_range, count_matching, reseed, search_transactions,
        summarise_month,
    },
};

/// The month shown when the dashboard is opened without choosing one.
const DEFAULT_MONTH: &str = "March";

/// The htmx event sent after the transactions are reloaded.
const TRANSACTIONS_RELOADED_EVENT: &str = "transactions-reloaded";

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading and replacing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The page size and number of page links for the transactions table.
    pub pagination_config: PaginationConfig,
    /// Where to fetch seed data from when reloading transactions.
    pub seed_config: SeedConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
            seed_config: state.seed_config.clone(),
        }
    }
}

/// The dashboard's query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The month to show, defaults to March.
    pub month: Option<String>,
    /// The page of the transactions table.
    pub page: Option<String>,
    /// Free text to filter the transactions table by.
    #[serde(default)]
    pub search: String,
}

/// Display the dashboard for the month in the query.
///
/// Requests made by htmx get just the dashboard content so that the month,
/// search box and page links can update it in place.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let selected_month = query
        .month
        .as_deref()
        .map(str::trim)
        .filter(|month| !month.is_empty())
        .unwrap_or(DEFAULT_MONTH);

    let content = match parse_month(selected_month) {
        Ok(month) => {
            let current_url = dashboard_url(
                month_name(month),
                &query.search,
                query.page.as_deref().and_then(|page| page.trim().parse().ok()),
            );
            dashboard_content(&current_url, dashboard_sections(month, &query, &state))
        }
        Err(error) => {
            tracing::debug!("dashboard requested with {error}");
            dashboard_content(endpoints::DASHBOARD_VIEW, error.into_alert())
        }
    };

    if is_htmx_request {
        content.into_response()
    } else {
        dashboard_view(selected_month, &query.search, content).into_response()
    }
}

/// Reload every transaction from the seed source and report the result as an alert.
///
/// On success the response triggers an htmx event that makes the dashboard
/// content refresh itself.
pub async fn initialize_dashboard(State(state): State<DashboardState>) -> Response {
    match reseed(&state.seed_config, &state.db_connection).await {
        Ok(count) => {
            let details = format!("Loaded {count} transactions from the seed source.");

            (
                [(HX_TRIGGER, TRANSACTIONS_RELOADED_EVENT)],
                Alert::success("Transactions reloaded", &details).into_html(),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not reload transactions: {error}");
            error.into_alert().into_response()
        }
    }
}

/// Everything the dashboard shows for a month, built from one read of its transactions.
struct MonthSummary {
    statistics: Statistics,
    table_page: Result<TablePage, Error>,
    price_ranges: Vec<PriceRangeCount>,
    categories: Vec<CategoryCount>,
}

fn dashboard_sections(month: Month, query: &DashboardQuery, state: &DashboardState) -> Markup {
    let month_name = month_name(month);
    let page = PageRequest::parse(query.page.as_deref(), None, &state.pagination_config);

    let summary = summarise_month(Some(month_name), &state.db_connection, |transactions| {
        MonthSummary {
            statistics: calculate_statistics(transactions),
            table_page: page.map(|page| TablePage {
                transactions: search_transactions(transactions, &query.search, page),
                total: count_matching(transactions, &query.search),
                page,
            }),
            price_ranges: count_by_price_range(transactions),
            categories: count_by_category(transactions),
        }
    });

    let summary = match summary {
        Ok(summary) => summary,
        Err(error) => return error.into_alert(),
    };

    let table = match summary.table_page {
        Ok(table_page) => transactions_table(
            month_name,
            &query.search,
            &table_page,
            state.pagination_config.max_pages,
        ),
        Err(error) => error.into_alert(),
    };

    html! {
        (statistics_cards(month_name, &summary.statistics))
        (table)
        (charts_section(month_name, &summary.price_ranges, &summary.categories))
    }
}

/// Renders both charts, or an empty state in place of each chart that has
/// nothing to show.
fn charts_section(
    month_name: &str,
    price_ranges: &[PriceRangeCount],
    categories: &[CategoryCount],
) -> Markup {
    let mut charts = Vec::new();

    let price_range_view = if price_ranges.iter().all(|range| range.count == 0) {
        empty_chart_view("Price Range", month_name)
    } else {
        let chart = DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(month_name, price_ranges).to_string(),
        };
        let container = chart_container(&chart);
        charts.push(chart);
        container
    };

    let category_view = if categories.is_empty() {
        empty_chart_view("Categories", month_name)
    } else {
        let chart = DashboardChart {
            id: "category-chart",
            options: category_chart(month_name, categories).to_string(),
        };
        let container = chart_container(&chart);
        charts.push(chart);
        container
    };

    html! {
        section id="charts" class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                (price_range_view)
                (category_view)
            }

            @if !charts.is_empty() {
                (charts_script(&charts))
            }
        }
    }
}

fn empty_chart_view(title: &str, month_name: &str) -> Markup {
    html! {
        div class="min-h-[380px] flex flex-col items-center justify-center rounded
            border border-dashed border-gray-300 dark:border-gray-600"
        {
            h4 class="text-lg font-semibold" { (title) }
            p data-empty-state="true" { "No sales data for " (month_name) }
        }
    }
}

/// The part of the dashboard that htmx swaps when the month, search or page changes.
fn dashboard_content(current_url: &str, sections: Markup) -> Markup {
    html! {
        div
            id="dashboard-content"
            class="flex flex-col items-center w-full"
            hx-get=(current_url)
            hx-trigger={ (TRANSACTIONS_RELOADED_EVENT) " from:body" }
            hx-swap="outerHTML"
        {
            (sections)
        }
    }
}

fn dashboard_view(selected_month: &str, search: &str, content: Markup) -> Markup {
    let content = html! {
        div class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl" }
        {
            div class="flex flex-wrap w-full justify-between items-end gap-4 mb-8"
            {
                h1 class="text-2xl font-bold" { "Transactions Dashboard" }

                form
                    method="get"
                    action=(endpoints::DASHBOARD_VIEW)
                    class="flex flex-wrap items-end gap-4"
                {
                    label class="text-sm font-medium"
                    {
                        "Month"
                        select
                            name="month"
                            class=(FORM_TEXT_INPUT_STYLE)
                            hx-get=(endpoints::DASHBOARD_VIEW)
                            hx-trigger="change"
                            hx-target="#dashboard-content"
                            hx-swap="outerHTML"
                            hx-include="closest form"
                            hx-push-url="true"
                        {
                            @for name in MONTH_NAMES {
                                option
                                    value=(name)
                                    selected[name.eq_ignore_ascii_case(selected_month)]
                                {
                                    (name)
                                }
                            }
                        }
                    }

                    label class="text-sm font-medium"
                    {
                        "Search"
                        input
                            type="search"
                            name="search"
                            value=(search)
                            placeholder="Title, description or price"
                            class=(FORM_TEXT_INPUT_STYLE)
                            hx-get=(endpoints::DASHBOARD_VIEW)
                            hx-trigger="input changed delay:300ms, search"
                            hx-target="#dashboard-content"
                            hx-swap="outerHTML"
                            hx-include="closest form"
                            hx-push-url="true";
                    }

                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        hx-post=(endpoints::DASHBOARD_INITIALIZE)
                        hx-target="#alert-container"
                        hx-swap="innerHTML"
                    {
                        "Reload transactions"
                    }
                }
            }

            (content)
        }
    };

    base(
        "Dashboard",
        &[HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())],
        &content,
    )
}
