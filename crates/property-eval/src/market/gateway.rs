use tracing::debug;

use super::census::CensusClient;
use super::lookup::{LookupOutcome, LookupState, MarketData};
use super::rent::RentEstimateStub;
use super::MarketError;
use crate::config::MarketApiConfig;
use crate::evaluation::SiteLocation;

/// Which optional lookups an evaluation request asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub median_income: bool,
    pub rent_estimate: bool,
}

/// Both market lookups plus the credentials they are called with. Holds no
/// state between calls, so one instance can be shared across requests.
#[derive(Debug, Clone)]
pub struct MarketGateway {
    census: CensusClient,
    rent: RentEstimateStub,
    config: MarketApiConfig,
}

impl MarketGateway {
    pub fn from_config(config: &MarketApiConfig) -> Result<Self, MarketError> {
        Ok(Self {
            census: CensusClient::new(config.census_api_url.clone())?,
            rent: RentEstimateStub,
            config: config.clone(),
        })
    }

    pub async fn median_income(&self, state_code: &str, county_code: &str) -> LookupOutcome {
        self.census
            .fetch_median_income(state_code, county_code, &self.config.census_api_key)
            .await
    }

    pub fn rent_estimate(&self, address: &str) -> LookupOutcome {
        self.rent
            .fetch_rent_estimate(address, &self.config.zillow_api_key)
    }

    /// Runs the requested lookups for `site`; lookups not requested stay
    /// `NotRequested` so their defaults apply. The returned data never holds
    /// `Pending`, which is only seen by callers that render before calling this.
    pub async fn enrich(&self, site: &SiteLocation, request: LookupRequest) -> MarketData {
        debug!(?request, "resolving market lookups");

        let median_income = if request.median_income {
            self.median_income(&site.state_fips, &site.county_fips)
                .await
                .into()
        } else {
            LookupState::NotRequested
        };
        let rent_estimate = if request.rent_estimate {
            self.rent_estimate(&site.property_address).into()
        } else {
            LookupState::NotRequested
        };

        MarketData {
            median_income,
            rent_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_gateway() -> MarketGateway {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("address");
        drop(listener);
        MarketGateway::from_config(&MarketApiConfig {
            census_api_key: "key".to_string(),
            zillow_api_key: String::new(),
            census_api_url: format!("http://{addr}/acs5"),
        })
        .expect("gateway builds")
    }

    fn site() -> SiteLocation {
        SiteLocation {
            property_address: "500 Grand Ave".to_string(),
            state_fips: "19".to_string(),
            county_fips: "153".to_string(),
        }
    }

    #[tokio::test]
    async fn leaves_unrequested_lookups_alone() {
        let market = offline_gateway()
            .enrich(&site(), LookupRequest::default())
            .await;
        assert_eq!(market, MarketData::default());
    }

    #[tokio::test]
    async fn resolves_requested_lookups_to_fallbacks_when_offline() {
        let market = offline_gateway()
            .enrich(
                &site(),
                LookupRequest {
                    median_income: true,
                    rent_estimate: true,
                },
            )
            .await;

        assert_ne!(market.median_income, LookupState::Pending);
        assert_ne!(market.rent_estimate, LookupState::Pending);
        assert!(market.median_income.is_fallback());
        assert_eq!(market.median_income(), None);
        assert_eq!(market.rent_estimate(), Some(2_500.0));
        assert_eq!(market.notices().len(), 2);
    }
}
