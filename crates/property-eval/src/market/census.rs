use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use super::lookup::LookupOutcome;
use super::MarketError;

/// American Community Survey 5-year estimates, 2021 vintage.
pub const CENSUS_ACS5_URL: &str = "https://api.census.gov/data/2021/acs/acs5";
/// Geography name plus median household income (table B19013).
pub const MEDIAN_INCOME_FIELDS: &str = "NAME,B19013_001E";
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum CensusLookupError {
    #[error(transparent)]
    Transport(reqwest::Error),
    #[error("response did not include a median income row")]
    MissingIncome,
    #[error("median income value {0} is not a usable number")]
    InvalidIncome(String),
}

// The request URL carries the API key, so it never reaches a notice or log line.
impl From<reqwest::Error> for CensusLookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Client for the Census median household income query.
#[derive(Debug, Clone)]
pub struct CensusClient {
    http: reqwest::Client,
    base_url: String,
}

impl CensusClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(MarketError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Looks up the county's median household income.
    ///
    /// Any failure resolves to the `N/A` fallback with a displayable notice.
    pub async fn fetch_median_income(
        &self,
        state_code: &str,
        county_code: &str,
        api_key: &str,
    ) -> LookupOutcome {
        match self.request_median_income(state_code, county_code, api_key).await {
            Ok(income) => {
                info!(
                    state = state_code,
                    county = county_code,
                    income,
                    "census median income resolved"
                );
                LookupOutcome::resolved(income)
            }
            Err(err) => {
                warn!(
                    state = state_code,
                    county = county_code,
                    error = %err,
                    "census lookup failed, using fallback"
                );
                LookupOutcome::unavailable(format!("Error fetching Census data: {err}"))
            }
        }
    }

    async fn request_median_income(
        &self,
        state_code: &str,
        county_code: &str,
        api_key: &str,
    ) -> Result<f64, CensusLookupError> {
        let county = format!("county:{county_code}");
        let state = format!("state:{state_code}");

        let rows: Vec<Vec<Value>> = self
            .http
            .get(&self.base_url)
            .query(&[
                ("get", MEDIAN_INCOME_FIELDS),
                ("for", county.as_str()),
                ("in", state.as_str()),
                ("key", api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // row 0 is the header, column 1 is B19013_001E
        let cell = rows
            .get(1)
            .and_then(|row| row.get(1))
            .ok_or(CensusLookupError::MissingIncome)?;
        parse_income(cell)
    }
}

/// Accepts finite, non-negative figures. The API reports missing estimates
/// as large negative annotation codes, which are rejected here.
pub(crate) fn parse_income(cell: &Value) -> Result<f64, CensusLookupError> {
    let parsed = match cell {
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    };

    match parsed {
        Some(income) if income.is_finite() && income >= 0.0 => Ok(income),
        _ => Err(CensusLookupError::InvalidIncome(cell.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server runs");
        });
        format!("http://{addr}/data/2021/acs/acs5")
    }

    async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let name = format!(
            "{} / {}",
            params.get("for").cloned().unwrap_or_default(),
            params.get("in").cloned().unwrap_or_default()
        );
        let income = if params.get("key").map(String::as_str) == Some("secret") {
            "72812"
        } else {
            "0"
        };
        Json(json!([
            ["NAME", "B19013_001E", "state", "county"],
            [name, income, "19", "153"],
        ]))
    }

    #[tokio::test]
    async fn resolves_income_from_second_row() {
        let router = Router::new().route("/data/2021/acs/acs5", get(echo_query));
        let client = CensusClient::new(serve(router).await).expect("client builds");

        let outcome = client.fetch_median_income("19", "153", "secret").await;

        assert_eq!(outcome, LookupOutcome::resolved(72_812.0));
    }

    #[tokio::test]
    async fn sends_fixed_query_parameters() {
        async fn assert_query(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
            let ok = params.get("get").map(String::as_str) == Some(MEDIAN_INCOME_FIELDS)
                && params.get("for").map(String::as_str) == Some("county:153")
                && params.get("in").map(String::as_str) == Some("state:19")
                && params.get("key").map(String::as_str) == Some("k");
            let income = if ok { "1" } else { "0" };
            Json(json!([["NAME", "B19013_001E"], ["Polk County, Iowa", income]]))
        }

        let router = Router::new().route("/data/2021/acs/acs5", get(assert_query));
        let client = CensusClient::new(serve(router).await).expect("client builds");

        let outcome = client.fetch_median_income("19", "153", "k").await;

        assert_eq!(outcome.value(), Some(1.0));
    }

    #[tokio::test]
    async fn connection_failure_falls_back_to_na() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("address");
        drop(listener);

        let client = CensusClient::new(format!("http://{addr}/acs5")).expect("client builds");
        let outcome = client.fetch_median_income("19", "153", "key").await;

        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.display_value(), "N/A");
        let notice = outcome.notice().expect("failure notice");
        assert!(notice.starts_with("Error fetching Census data:"), "{notice}");
    }

    #[tokio::test]
    async fn failure_notice_omits_api_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("address");
        drop(listener);

        let client = CensusClient::new(format!("http://{addr}/acs5")).expect("client builds");
        let outcome = client
            .fetch_median_income("19", "153", "census-secret-4821")
            .await;

        let notice = outcome.notice().expect("failure notice");
        assert!(!notice.contains("census-secret-4821"), "{notice}");
        assert!(!notice.contains("key="), "{notice}");
    }

    #[tokio::test]
    async fn error_status_notice_omits_api_key() {
        let router = Router::new().route(
            "/data/2021/acs/acs5",
            get(|| async { (StatusCode::FORBIDDEN, "invalid key") }),
        );
        let client = CensusClient::new(serve(router).await).expect("client builds");

        let outcome = client
            .fetch_median_income("19", "153", "census-secret-4821")
            .await;

        let notice = outcome.notice().expect("failure notice");
        assert!(notice.starts_with("Error fetching Census data:"), "{notice}");
        assert!(!notice.contains("census-secret-4821"), "{notice}");
    }

    #[tokio::test]
    async fn error_status_falls_back_to_na() {
        let router = Router::new().route(
            "/data/2021/acs/acs5",
            get(|| async { (StatusCode::BAD_REQUEST, "error: unknown variable") }),
        );
        let client = CensusClient::new(serve(router).await).expect("client builds");

        let outcome = client.fetch_median_income("19", "153", "").await;

        assert_eq!(outcome.display_value(), "N/A");
        assert!(outcome.notice().is_some());
    }

    #[tokio::test]
    async fn malformed_body_falls_back_to_na() {
        let router = Router::new().route(
            "/data/2021/acs/acs5",
            get(|| async { "<html>Invalid Key</html>" }),
        );
        let client = CensusClient::new(serve(router).await).expect("client builds");

        let outcome = client.fetch_median_income("19", "153", "bad").await;

        assert_eq!(outcome.value(), None);
    }

    #[tokio::test]
    async fn header_only_payload_falls_back_to_na() {
        let router = Router::new().route(
            "/data/2021/acs/acs5",
            get(|| async { Json(json!([["NAME", "B19013_001E"]])) }),
        );
        let client = CensusClient::new(serve(router).await).expect("client builds");

        let outcome = client.fetch_median_income("19", "999", "k").await;

        let notice = outcome.notice().expect("notice present");
        assert!(notice.contains("median income row"), "{notice}");
    }

    #[test]
    fn parse_income_accepts_numeric_strings_and_numbers() {
        assert_eq!(parse_income(&json!("72812")).ok(), Some(72_812.0));
        assert_eq!(parse_income(&json!(" 65000 ")).ok(), Some(65_000.0));
        assert_eq!(parse_income(&json!(58000)).ok(), Some(58_000.0));
    }

    #[test]
    fn parse_income_rejects_annotations_and_text() {
        for cell in [json!("-666666666"), json!("abc"), json!(null), json!([1])] {
            match parse_income(&cell) {
                Err(CensusLookupError::InvalidIncome(raw)) => assert_eq!(raw, cell.to_string()),
                other => panic!("expected invalid income for {cell}, got {other:?}"),
            }
        }
    }
}
