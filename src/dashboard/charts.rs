//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for a month of sales:
//! - **Price Range Chart**: bar chart of the number of items in each price range
//! - **Category Chart**: pie chart of the number of items in each category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::{bar, pie},
};
use maud::{Markup, PreEscaped, html};

use crate::transaction::{CategoryCount, PriceRangeCount};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a chart.
pub(super) fn chart_container(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates the JavaScript that initializes `charts`.
///
/// The script must be placed after the chart containers. It runs both on a
/// full page load and when htmx swaps in new dashboard content, so charts from
/// an earlier render are disposed before the new ones are created.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let chart_inits = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    echarts.getInstanceByDom(chartDom)?.dispose();
                    const chart = echarts.init(chartDom);
                    chart.setOption({});
                    window.dashboardCharts.push(chart);
                }})();"#,
                chart.id,
                escape_script_json(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let script_content = format!(
        r#"(window.dashboardCharts || []).forEach((chart) => chart.dispose());
        window.dashboardCharts = [];
        if (!window.dashboardChartsResize) {{
            window.dashboardChartsResize = () => window.dashboardCharts.forEach((chart) => chart.resize());
            window.addEventListener('resize', window.dashboardChartsResize);
        }}
        {chart_inits}"#
    );

    html!(script { (PreEscaped(script_content)) })
}

/// Escapes `<` in chart options so that labels from the seed data cannot
/// close the surrounding script element. The result is still valid JSON.
fn escape_script_json(options: &str) -> String {
    options.replace('<', "\\u003c")
}

pub(super) fn price_range_chart(month_name: &str, price_ranges: &[PriceRangeCount]) -> Chart {
    let labels: Vec<&str> = price_ranges.iter().map(|range| range.range).collect();
    let values: Vec<f64> = price_ranges
        .iter()
        .map(|range| range.count as f64)
        .collect();

    Chart::new()
        .title(Title::new().text("Price Range").subtext(month_name))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(bar::Bar::new().name("Items").data(values))
}

pub(super) fn category_chart(month_name: &str, categories: &[CategoryCount]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|category| (category.count as f64, category.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Categories").subtext(month_name))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            pie::Pie::new()
                .name("Items")
                .radius("65%")
                .data(data),
        )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::transaction::{CategoryCount, PriceRangeCount};

    use super::{DashboardChart, category_chart, charts_script, price_range_chart};

    #[test]
    fn price_range_chart_has_every_label() {
        let ranges = [
            PriceRangeCount {
                range: "0-100",
                count: 3,
            },
            PriceRangeCount {
                range: "901+",
                count: 1,
            },
        ];

        let options = price_range_chart("March", &ranges).to_string();

        assert!(options.contains("\"0-100\""));
        assert!(options.contains("\"901+\""));
        assert!(options.contains("March"));
    }

    #[test]
    fn category_chart_has_every_category() {
        let categories = [
            CategoryCount {
                category: "Electronics".to_owned(),
                count: 2,
            },
            CategoryCount {
                category: "Furniture".to_owned(),
                count: 1,
            },
        ];

        let options = category_chart("March", &categories).to_string();

        assert!(options.contains("Electronics"));
        assert!(options.contains("Furniture"));
    }

    #[test]
    fn script_initialises_each_chart() {
        let charts = [
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let script = charts_script(&charts).into_string();

        assert!(script.contains("getElementById(\"first-chart\")"));
        assert!(script.contains("getElementById(\"second-chart\")"));
    }

    #[test]
    fn script_registers_resize_listener_once() {
        let charts = [DashboardChart {
            id: "only-chart",
            options: "{}".to_owned(),
        }];

        let script = charts_script(&charts).into_string();

        assert_eq!(script.matches("addEventListener").count(), 1);
        assert!(script.contains("if (!window.dashboardChartsResize)"));
        assert!(script.contains("chart.dispose()"));
    }

    #[test]
    fn category_labels_cannot_close_script() {
        let categories = [CategoryCount {
            category: "</script><img src=x onerror=alert(1)>".to_owned(),
            count: 1,
        }];
        let charts = [DashboardChart {
            id: "category-chart",
            options: category_chart("March", &categories).to_string(),
        }];

        let script = charts_script(&charts).into_string();

        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.ends_with("</script>"));
        assert!(!script.contains("<img"));
        assert!(script.contains("\\u003c/script>\\u003cimg src=x onerror=alert(1)>"));

        let html = Html::parse_fragment(&script);
        let img = Selector::parse("img").unwrap();
        assert_eq!(html.select(&img).count(), 0);
    }
}
