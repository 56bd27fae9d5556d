//! Page templates. Markup lives in `templates/`; askama escapes every interpolated value.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use time::{macros::format_description, OffsetDateTime};
use tracing::error;

use crate::{
    auth::{
        credentials::Credential,
        login::{LABEL_IDLE, LABEL_SUBMITTING, MSG_MISSING_FIELDS, MSG_TRANSPORT_ERROR},
    },
    visits::services::VisitSummary,
};

/// Renders a template into an HTML response; a render failure becomes a bare 500.
pub struct Page<T>(pub T);

impl<T: Template> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!(error = %e, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
            }
        }
    }
}

fn format_time(t: OffsetDateTime) -> String {
    let fmt = format_description!("[day]/[month]/[year] [hour]:[minute]:[second] UTC");
    t.to_offset(time::UtcOffset::UTC)
        .format(&fmt)
        .unwrap_or_else(|_| t.to_string())
}

/// One row of the recent-visits list.
pub struct VisitRow {
    pub timestamp: String,
    pub ip_address: String,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub total_visits: i64,
    pub port: u16,
    pub server_time: String,
    pub visits: Vec<VisitRow>,
}

impl HomeTemplate {
    pub fn new(summary: &VisitSummary, port: u16, server_time: OffsetDateTime) -> Self {
        Self {
            total_visits: summary.total_visits,
            port,
            server_time: format_time(server_time),
            visits: summary
                .recent
                .iter()
                .map(|v| VisitRow {
                    timestamp: format_time(v.timestamp),
                    ip_address: v.ip_address.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "store_failure.html")]
pub struct StoreFailureTemplate {
    pub error: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub demo: Vec<Credential>,
    pub label_idle: &'static str,
    pub label_submitting: &'static str,
    pub msg_missing_fields: &'static str,
    pub msg_transport_error: &'static str,
}

impl LoginTemplate {
    pub fn new(demo: &[&Credential]) -> Self {
        Self {
            demo: demo.iter().map(|c| (*c).clone()).collect(),
            label_idle: LABEL_IDLE,
            label_submitting: LABEL_SUBMITTING,
            msg_missing_fields: MSG_MISSING_FIELDS,
            msg_transport_error: MSG_TRANSPORT_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::credentials::CredentialTable, visits::repo_types::VisitRecord};
    use time::macros::datetime;

    #[test]
    fn home_page_lists_recent_visits() {
        let summary = VisitSummary {
            total_visits: 42,
            recent: vec![VisitRecord {
                id: 42,
                timestamp: datetime!(2024-03-01 10:20:30 UTC),
                ip_address: "10.1.2.3".into(),
            }],
        };
        let html = HomeTemplate::new(&summary, 3000, datetime!(2024-03-01 10:20:31 UTC))
            .render()
            .unwrap();

        assert!(html.contains("Total de visitas:</strong> 42"));
        assert!(html.contains("Puerto:</strong> 3000"));
        assert!(html.contains("01/03/2024 10:20:30 UTC - IP: 10.1.2.3"));
        assert!(html.contains("01/03/2024 10:20:31 UTC"));
    }

    #[test]
    fn stored_ip_text_is_escaped() {
        let summary = VisitSummary {
            total_visits: 1,
            recent: vec![VisitRecord {
                id: 1,
                timestamp: datetime!(2024-03-01 10:20:30 UTC),
                ip_address: "<script>x</script>".into(),
            }],
        };
        let html = HomeTemplate::new(&summary, 3000, datetime!(2024-03-01 10:20:31 UTC))
            .render()
            .unwrap();
        assert!(!html.contains("<script>x</script>"));
    }

    #[test]
    fn failure_page_escapes_error_text() {
        let html = StoreFailureTemplate {
            error: "bad <thing>".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("No se pudo conectar a la base de datos"));
        assert!(html.contains("Error: bad "));
        assert!(!html.contains("<thing>"));
    }

    #[test]
    fn login_page_lists_demo_pairs() {
        let table = CredentialTable::demo();
        let html = LoginTemplate::new(&table.entries()).render().unwrap();
        assert!(html.contains("admin / 123456"));
        assert!(html.contains("user / password"));
        assert!(html.contains(LABEL_SUBMITTING));
    }
}
