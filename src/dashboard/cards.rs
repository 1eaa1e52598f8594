//! Cards showing a month's sales totals.

use maud::{Markup, html};

use crate::{html::format_currency, transaction::Statistics};

/// Renders the total sale amount and the sold and unsold item counts.
pub(super) fn statistics_cards(month_name: &str, statistics: &Statistics) -> Markup {
    html! {
        section id="statistics" class="w-full mx-auto mb-8"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Statistics" }

                span class="text-sm text-gray-600 dark:text-gray-400" { (month_name) }
            }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                (statistic_card("Total sale", &format_currency(statistics.total_amount)))
                (statistic_card("Sold items", &statistics.sold_items.to_string()))
                (statistic_card("Not sold items", &statistics.not_sold_items.to_string()))
            }
        }
    }
}

fn statistic_card(label: &str, value: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{label}: {value}"))
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }

            div class="text-3xl font-bold" data-statistic=(label) { (value) }
        }
    }
}
