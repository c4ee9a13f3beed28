use tracing::warn;

use super::lookup::{LookupOutcome, DEFAULT_RENT_ESTIMATE};

pub const RENT_ESTIMATE_NOTICE: &str =
    "Zillow API integration requires approval and setup. Returning sample value.";

/// Stand-in for the Zillow rent Zestimate lookup.
///
/// API access has not been approved, so this never contacts a remote service
/// and always answers with the sample rent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentEstimateStub;

impl RentEstimateStub {
    pub fn fetch_rent_estimate(&self, address: &str, _api_key: &str) -> LookupOutcome {
        warn!(address, "rent estimate integration not configured, returning sample value");
        LookupOutcome::sample(DEFAULT_RENT_ESTIMATE, RENT_ESTIMATE_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Sentinel;

    #[test]
    fn always_returns_sample_rent_with_notice() {
        let stub = RentEstimateStub;
        for (address, key) in [
            ("", ""),
            ("500 Grand Ave, Des Moines, IA", "zws-key"),
            ("unknown", "whatever"),
        ] {
            let outcome = stub.fetch_rent_estimate(address, key);
            assert_eq!(
                outcome,
                LookupOutcome::Fallback {
                    sentinel: Sentinel::Sample(2_500.0),
                    notice: RENT_ESTIMATE_NOTICE.to_string(),
                }
            );
            assert_eq!(outcome.display_value(), "$2,500.00");
        }
    }
}
