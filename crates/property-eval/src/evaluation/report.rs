use serde::Serialize;

use super::engine::EvaluationResult;
use super::format::{format_currency, format_percent};
use super::inputs::ProjectInputs;
use crate::market::{LookupOutcome, LookupState, MarketData};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketLine {
    pub label: &'static str,
    pub status: &'static str,
    pub value: Option<f64>,
    pub display: String,
}

/// Display-ready view of an evaluation: labelled metrics, unit mix lines,
/// parser warnings and the market figures that were in effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub metrics: Vec<MetricRow>,
    pub unit_mix: Vec<String>,
    pub warnings: Vec<String>,
    pub market: Vec<MarketLine>,
    pub notices: Vec<String>,
}

impl EvaluationReport {
    pub fn new(inputs: &ProjectInputs, result: &EvaluationResult) -> Self {
        let metrics = vec![
            MetricRow {
                label: "Total Development Cost",
                value: result.total_development_cost,
                display: format_currency(result.total_development_cost),
            },
            MetricRow {
                label: "Net Operating Income (NOI)",
                value: result.net_operating_income,
                display: format_currency(result.net_operating_income),
            },
            MetricRow {
                label: "For-Sale ROI",
                value: result.roi_percent,
                display: format_percent(result.roi_percent),
            },
        ];

        Self {
            metrics,
            unit_mix: result.unit_mix.summary_lines(),
            warnings: inputs
                .unit_mix_warnings
                .iter()
                .map(ToString::to_string)
                .collect(),
            market: market_lines(&inputs.market),
            notices: inputs.market.notices(),
        }
    }

    pub fn metric(&self, label: &str) -> Option<&MetricRow> {
        self.metrics.iter().find(|row| row.label == label)
    }
}

pub fn market_lines(market: &MarketData) -> Vec<MarketLine> {
    vec![
        market_line(
            "Median Household Income",
            &market.median_income,
            market.median_income(),
        ),
        market_line(
            "Zillow Rent Zestimate",
            &market.rent_estimate,
            market.rent_estimate(),
        ),
    ]
}

fn market_line(label: &'static str, state: &LookupState, value: Option<f64>) -> MarketLine {
    let status = match state {
        LookupState::NotRequested => "default",
        LookupState::Pending => "pending",
        LookupState::Resolved {
            outcome: LookupOutcome::Resolved { .. },
        } => "resolved",
        LookupState::Resolved {
            outcome: LookupOutcome::Fallback { .. },
        } => "fallback",
    };
    let display = match value {
        Some(value) => format_currency(value),
        None => "N/A".to_string(),
    };

    MarketLine {
        label,
        status,
        value,
        display,
    }
}
