//! Project inputs, unit-mix parsing and the development metrics.

mod engine;
mod format;
mod inputs;
mod report;
mod unit_mix;

pub use engine::{evaluate, return_on_investment, total_development_cost, EvaluationResult};
pub use format::{format_currency, format_percent};
pub use inputs::{
    split_list, InputError, ProjectForm, ProjectInputs, ProjectNarrative, SiteLocation,
    DEFAULT_AVG_DWELLING_PRICE_OWN, DEFAULT_BUILDING_SQ_FT, DEFAULT_COMMERCIAL_UNITS,
    DEFAULT_CONDO_SELLOUT, DEFAULT_CONVERSION_COSTS, DEFAULT_COST_PER_SQ_FT,
    DEFAULT_OCCUPANCY_RATE, DEFAULT_OPERATING_EXPENSES, DEFAULT_RENTAL_INCOME,
};
pub use report::{market_lines, EvaluationReport, MarketLine, MetricRow};
pub use unit_mix::{parse_unit_mix, UnitMix, UnitMixEntry, UnitMixParse, UnitMixWarning};
