use serde::{Deserialize, Serialize};

use super::engine::{return_on_investment, total_development_cost};
use super::unit_mix::{parse_unit_mix, UnitMix, UnitMixWarning};
use crate::market::MarketData;

pub const DEFAULT_COST_PER_SQ_FT: f64 = 200.0;
pub const DEFAULT_AVG_DWELLING_PRICE_OWN: f64 = 350_000.0;
pub const DEFAULT_BUILDING_SQ_FT: f64 = 50_000.0;
pub const DEFAULT_COMMERCIAL_UNITS: u32 = 3;
pub const DEFAULT_CONVERSION_COSTS: f64 = 3_000_000.0;
pub const DEFAULT_RENTAL_INCOME: f64 = 1_200_000.0;
pub const DEFAULT_OPERATING_EXPENSES: f64 = 400_000.0;
pub const DEFAULT_CONDO_SELLOUT: f64 = 20_000_000.0;
pub const DEFAULT_OCCUPANCY_RATE: u8 = 92;

/// Raw project parameters as typed by a user. Every field is optional and
/// nothing is validated until conversion into [`ProjectInputs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub discovery: Option<String>,
    pub validation: Option<String>,
    pub creation: Option<String>,
    pub relationship: Option<String>,
    pub zoning: Option<String>,
    pub permitting_process: Option<String>,
    pub demographics: Option<String>,
    pub net_migration: Option<String>,
    pub property_address: Option<String>,
    pub state_fips: Option<String>,
    pub county_fips: Option<String>,
    /// Comma-separated.
    pub government_programs: Option<String>,
    /// Comma-separated.
    pub improvement_districts: Option<String>,
    pub cost_per_sq_ft: Option<f64>,
    pub avg_dwelling_price_own: Option<f64>,
    pub building_sq_ft: Option<f64>,
    pub commercial_units: Option<i64>,
    pub conversion_costs: Option<f64>,
    pub rental_income: Option<f64>,
    pub operating_expenses: Option<f64>,
    pub condo_sellout: Option<f64>,
    pub occupancy_rate: Option<i64>,
    /// `label:count` pairs, e.g. `1BR:20,2BR:15`.
    pub unit_mix: Option<String>,
}

/// Free-text notes carried through the evaluation untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectNarrative {
    pub discovery: String,
    pub validation: String,
    pub creation: String,
    pub relationship: String,
    pub zoning: String,
    pub permitting_process: String,
    pub demographics: String,
    pub net_migration: String,
}

/// Where the project sits; the FIPS codes feed the Census lookup and the
/// address feeds the rent estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteLocation {
    pub property_address: String,
    pub state_fips: String,
    pub county_fips: String,
}

/// Validated snapshot of one evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInputs {
    pub narrative: ProjectNarrative,
    pub site: SiteLocation,
    pub government_programs: Vec<String>,
    pub improvement_districts: Vec<String>,
    pub cost_per_sq_ft: f64,
    pub avg_dwelling_price_own: f64,
    pub building_sq_ft: f64,
    pub commercial_units: u32,
    pub conversion_costs: f64,
    pub rental_income: f64,
    pub operating_expenses: f64,
    pub condo_sellout: f64,
    pub occupancy_rate: u8,
    pub unit_mix: UnitMix,
    pub unit_mix_warnings: Vec<UnitMixWarning>,
    pub market: MarketData,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be zero or greater (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("inputs are too large to compute {metric}")]
    Overflow { metric: &'static str },
    #[error("{field} must be between 0 and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

impl Default for ProjectInputs {
    fn default() -> Self {
        Self {
            narrative: ProjectNarrative::default(),
            site: SiteLocation::default(),
            government_programs: split_list(""),
            improvement_districts: split_list(""),
            cost_per_sq_ft: DEFAULT_COST_PER_SQ_FT,
            avg_dwelling_price_own: DEFAULT_AVG_DWELLING_PRICE_OWN,
            building_sq_ft: DEFAULT_BUILDING_SQ_FT,
            commercial_units: DEFAULT_COMMERCIAL_UNITS,
            conversion_costs: DEFAULT_CONVERSION_COSTS,
            rental_income: DEFAULT_RENTAL_INCOME,
            operating_expenses: DEFAULT_OPERATING_EXPENSES,
            condo_sellout: DEFAULT_CONDO_SELLOUT,
            occupancy_rate: DEFAULT_OCCUPANCY_RATE,
            unit_mix: UnitMix::default(),
            unit_mix_warnings: Vec::new(),
            market: MarketData::default(),
        }
    }
}

impl ProjectInputs {
    pub fn from_form(form: ProjectForm) -> Result<Self, InputError> {
        let ProjectForm {
            discovery,
            validation,
            creation,
            relationship,
            zoning,
            permitting_process,
            demographics,
            net_migration,
            property_address,
            state_fips,
            county_fips,
            government_programs,
            improvement_districts,
            cost_per_sq_ft,
            avg_dwelling_price_own,
            building_sq_ft,
            commercial_units,
            conversion_costs,
            rental_income,
            operating_expenses,
            condo_sellout,
            occupancy_rate,
            unit_mix,
        } = form;

        let parsed = parse_unit_mix(unit_mix.as_deref().unwrap_or_default());

        let inputs = Self {
            narrative: ProjectNarrative {
                discovery: discovery.unwrap_or_default(),
                validation: validation.unwrap_or_default(),
                creation: creation.unwrap_or_default(),
                relationship: relationship.unwrap_or_default(),
                zoning: zoning.unwrap_or_default(),
                permitting_process: permitting_process.unwrap_or_default(),
                demographics: demographics.unwrap_or_default(),
                net_migration: net_migration.unwrap_or_default(),
            },
            site: SiteLocation {
                property_address: property_address.unwrap_or_default(),
                state_fips: state_fips.unwrap_or_default(),
                county_fips: county_fips.unwrap_or_default(),
            },
            government_programs: split_list(government_programs.as_deref().unwrap_or_default()),
            improvement_districts: split_list(
                improvement_districts.as_deref().unwrap_or_default(),
            ),
            cost_per_sq_ft: amount("cost_per_sq_ft", cost_per_sq_ft, DEFAULT_COST_PER_SQ_FT)?,
            avg_dwelling_price_own: amount(
                "avg_dwelling_price_own",
                avg_dwelling_price_own,
                DEFAULT_AVG_DWELLING_PRICE_OWN,
            )?,
            building_sq_ft: amount("building_sq_ft", building_sq_ft, DEFAULT_BUILDING_SQ_FT)?,
            commercial_units: bounded(
                "commercial_units",
                commercial_units,
                i64::from(u32::MAX),
                DEFAULT_COMMERCIAL_UNITS,
            )?,
            conversion_costs: amount(
                "conversion_costs",
                conversion_costs,
                DEFAULT_CONVERSION_COSTS,
            )?,
            rental_income: amount("rental_income", rental_income, DEFAULT_RENTAL_INCOME)?,
            operating_expenses: amount(
                "operating_expenses",
                operating_expenses,
                DEFAULT_OPERATING_EXPENSES,
            )?,
            condo_sellout: amount("condo_sellout", condo_sellout, DEFAULT_CONDO_SELLOUT)?,
            occupancy_rate: bounded("occupancy_rate", occupancy_rate, 100, DEFAULT_OCCUPANCY_RATE)?,
            unit_mix: parsed.mix,
            unit_mix_warnings: parsed.warnings,
            market: MarketData::default(),
        };
        inputs.check_derived_metrics()?;
        Ok(inputs)
    }

    /// Each amount is finite on its own, but products and ratios of them can
    /// still overflow.
    fn check_derived_metrics(&self) -> Result<(), InputError> {
        let total = total_development_cost(
            self.building_sq_ft,
            self.cost_per_sq_ft,
            self.conversion_costs,
        );
        if !total.is_finite() {
            return Err(InputError::Overflow {
                metric: "total_development_cost",
            });
        }
        if !return_on_investment(self.condo_sellout - total, total).is_finite() {
            return Err(InputError::Overflow {
                metric: "roi_percent",
            });
        }
        Ok(())
    }

    pub fn with_market(mut self, market: MarketData) -> Self {
        self.market = market;
        self
    }
}

impl TryFrom<ProjectForm> for ProjectInputs {
    type Error = InputError;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        Self::from_form(form)
    }
}

/// Splits comma-separated text into trimmed entries. Empty entries stay, so
/// an empty input yields a single empty string.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(|item| item.trim().to_string()).collect()
}

fn amount(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, InputError> {
    let Some(value) = value else {
        return Ok(default);
    };
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    // normalise -0.0
    Ok(value + 0.0)
}

fn bounded<T>(field: &'static str, value: Option<i64>, max: i64, default: T) -> Result<T, InputError>
where
    T: TryFrom<i64>,
{
    let Some(value) = value else {
        return Ok(default);
    };
    if !(0..=max).contains(&value) {
        return Err(InputError::OutOfRange { field, value, max });
    }
    T::try_from(value).map_err(|_| InputError::OutOfRange { field, value, max })
}
