use serde::Serialize;

use crate::evaluation::format_currency;

/// Median household income assumed until a Census lookup resolves.
pub const DEFAULT_MEDIAN_INCOME: f64 = 85_000.0;
/// Monthly rent assumed until a rent estimate resolves.
pub const DEFAULT_RENT_ESTIMATE: f64 = 2_500.0;

/// Placeholder substituted when a lookup cannot produce a real figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sentinel {
    /// Rendered as `N/A`; carries no number.
    NotAvailable,
    /// A fixed sample figure that stands in for the real one.
    Sample(f64),
}

/// Result of a single external lookup. Failures are folded into `Fallback`,
/// so callers never see transport or parse errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    Resolved { value: f64 },
    Fallback { sentinel: Sentinel, notice: String },
}

impl LookupOutcome {
    pub fn resolved(value: f64) -> Self {
        Self::Resolved { value }
    }

    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self::Fallback {
            sentinel: Sentinel::NotAvailable,
            notice: notice.into(),
        }
    }

    pub fn sample(value: f64, notice: impl Into<String>) -> Self {
        Self::Fallback {
            sentinel: Sentinel::Sample(value),
            notice: notice.into(),
        }
    }

    /// The number to use downstream, if there is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Resolved { value } => Some(*value),
            Self::Fallback {
                sentinel: Sentinel::Sample(value),
                ..
            } => Some(*value),
            Self::Fallback {
                sentinel: Sentinel::NotAvailable,
                ..
            } => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Resolved { .. } => None,
            Self::Fallback { notice, .. } => Some(notice),
        }
    }

    pub fn display_value(&self) -> String {
        match self.value() {
            Some(value) => format_currency(value),
            None => "N/A".to_string(),
        }
    }
}

/// Progress of an optional lookup within one evaluation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    NotRequested,
    Pending,
    Resolved { outcome: LookupOutcome },
}

impl LookupState {
    /// The figure to use: `default` until the lookup resolves, then the
    /// lookup's value. A `NotAvailable` fallback yields `None`.
    pub fn effective_value(&self, default: f64) -> Option<f64> {
        match self {
            Self::NotRequested | Self::Pending => Some(default),
            Self::Resolved { outcome } => outcome.value(),
        }
    }

    pub fn outcome(&self) -> Option<&LookupOutcome> {
        match self {
            Self::Resolved { outcome } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Self::Resolved {
                outcome: LookupOutcome::Fallback { .. }
            }
        )
    }
}

impl From<LookupOutcome> for LookupState {
    fn from(outcome: LookupOutcome) -> Self {
        Self::Resolved { outcome }
    }
}

/// External figures attached to a project snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketData {
    pub median_income: LookupState,
    pub rent_estimate: LookupState,
}

impl MarketData {
    pub fn median_income(&self) -> Option<f64> {
        self.median_income.effective_value(DEFAULT_MEDIAN_INCOME)
    }

    pub fn rent_estimate(&self) -> Option<f64> {
        self.rent_estimate.effective_value(DEFAULT_RENT_ESTIMATE)
    }

    /// Notices from fallback lookups, income first.
    pub fn notices(&self) -> Vec<String> {
        [&self.median_income, &self.rent_estimate]
            .into_iter()
            .filter_map(|state| state.outcome().and_then(LookupOutcome::notice))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrequested_lookups_use_defaults() {
        let market = MarketData::default();
        assert_eq!(market.median_income(), Some(85_000.0));
        assert_eq!(market.rent_estimate(), Some(2_500.0));
        assert!(market.notices().is_empty());
    }

    #[test]
    fn pending_lookups_still_use_defaults() {
        let market = MarketData {
            median_income: LookupState::Pending,
            rent_estimate: LookupState::Pending,
        };
        assert_eq!(market.median_income(), Some(DEFAULT_MEDIAN_INCOME));
        assert_eq!(market.rent_estimate(), Some(DEFAULT_RENT_ESTIMATE));
    }

    #[test]
    fn unavailable_income_has_no_value_and_shows_na() {
        let outcome = LookupOutcome::unavailable("Error fetching Census data: timed out");
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.display_value(), "N/A");

        let market = MarketData {
            median_income: outcome.into(),
            ..MarketData::default()
        };
        assert_eq!(market.median_income(), None);
        assert!(market.median_income.is_fallback());
        assert_eq!(
            market.notices(),
            vec!["Error fetching Census data: timed out".to_string()]
        );
    }

    #[test]
    fn resolved_and_sample_values_are_used() {
        let market = MarketData {
            median_income: LookupOutcome::resolved(72_812.0).into(),
            rent_estimate: LookupOutcome::sample(2_500.0, "sample").into(),
        };
        assert_eq!(market.median_income(), Some(72_812.0));
        assert_eq!(market.rent_estimate(), Some(2_500.0));
        assert!(!market.median_income.is_fallback());
        assert_eq!(market.notices(), vec!["sample".to_string()]);
    }

    #[test]
    fn outcomes_serialize_with_tags() {
        let json = serde_json::to_value(LookupOutcome::unavailable("down")).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "outcome": "fallback",
                "sentinel": { "kind": "not_available" },
                "notice": "down",
            })
        );
    }
}
