//! External market data: Census median household income and a rent estimate.
//!
//! Every lookup resolves to a [`LookupOutcome`]; transport and parsing
//! failures become fallbacks with a notice instead of errors.

mod census;
mod gateway;
mod lookup;
mod rent;

pub use census::{
    CensusClient, CensusLookupError, CENSUS_ACS5_URL, LOOKUP_TIMEOUT, MEDIAN_INCOME_FIELDS,
};
pub use gateway::{LookupRequest, MarketGateway};
pub use lookup::{
    LookupOutcome, LookupState, MarketData, Sentinel, DEFAULT_MEDIAN_INCOME,
    DEFAULT_RENT_ESTIMATE,
};
pub use rent::{RentEstimateStub, RENT_ESTIMATE_NOTICE};

/// Failure to set up a lookup client. Lookups themselves never error.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("unable to build http client: {0}")]
    Client(reqwest::Error),
}
