//! Alert banners for displaying error and success messages on the dashboard.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// A dismissable alert message.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let style = match self.alert_type {
            AlertType::Success => {
                "bg-green-50 border-l-4 border-green-400 text-green-800 \
                dark:bg-gray-800 dark:text-green-400"
            }
            AlertType::Error => {
                "bg-red-50 border-l-4 border-red-400 text-red-800 \
                dark:bg-gray-800 dark:text-red-400"
            }
        };
        let role = match self.alert_type {
            AlertType::Success => "status",
            AlertType::Error => "alert",
        };

        html! {
            div class={ "w-full p-4 mb-4 rounded-lg " (style) } role=(role)
            {
                p class="font-semibold" { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm" { (self.details) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_has_alert_role() {
        let html = Html::parse_fragment(
            &Alert::error("Oops", "Something broke")
                .into_html()
                .into_string(),
        );
        let selector = Selector::parse("div[role=alert]").unwrap();

        let alert = html.select(&selector).next().expect("No alert found");
        let text = alert.text().collect::<String>();

        assert!(text.contains("Oops"));
        assert!(text.contains("Something broke"));
    }

    #[test]
    fn omits_empty_details() {
        let html = Html::parse_fragment(&Alert::success("Done", "").into_html().into_string());
        let selector = Selector::parse("p").unwrap();

        assert_eq!(html.select(&selector).count(), 1);
    }
}
