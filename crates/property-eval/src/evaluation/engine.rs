use serde::Serialize;

use super::inputs::ProjectInputs;
use super::unit_mix::UnitMix;

/// Metrics derived from one [`ProjectInputs`] snapshot. Values are exact;
/// rounding happens only when they are rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub total_development_cost: f64,
    pub net_operating_income: f64,
    pub profit: f64,
    pub roi_percent: f64,
    pub unit_mix: UnitMix,
}

/// Computes development cost, NOI and for-sale ROI.
///
/// Inputs are assumed validated; no range checks happen here.
pub fn evaluate(inputs: &ProjectInputs) -> EvaluationResult {
    let total_development_cost = total_development_cost(
        inputs.building_sq_ft,
        inputs.cost_per_sq_ft,
        inputs.conversion_costs,
    );
    let net_operating_income = inputs.rental_income - inputs.operating_expenses;
    let profit = inputs.condo_sellout - total_development_cost;

    EvaluationResult {
        total_development_cost,
        net_operating_income,
        profit,
        roi_percent: return_on_investment(profit, total_development_cost),
        unit_mix: inputs.unit_mix.clone(),
    }
}

pub fn total_development_cost(
    building_sq_ft: f64,
    cost_per_sq_ft: f64,
    conversion_costs: f64,
) -> f64 {
    building_sq_ft * cost_per_sq_ft + conversion_costs
}

/// Profit as a percentage of cost; zero when there is no cost.
pub fn return_on_investment(profit: f64, total_development_cost: f64) -> f64 {
    if total_development_cost == 0.0 {
        return 0.0;
    }
    profit / total_development_cost * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{parse_unit_mix, ProjectForm};

    fn scenario() -> ProjectInputs {
        ProjectInputs::try_from(ProjectForm {
            building_sq_ft: Some(50_000.0),
            cost_per_sq_ft: Some(200.0),
            conversion_costs: Some(3_000_000.0),
            rental_income: Some(1_200_000.0),
            operating_expenses: Some(400_000.0),
            condo_sellout: Some(20_000_000.0),
            ..ProjectForm::default()
        })
        .expect("scenario inputs are valid")
    }

    #[test]
    fn computes_reference_scenario() {
        let result = evaluate(&scenario());
        assert_eq!(result.total_development_cost, 13_000_000.0);
        assert_eq!(result.net_operating_income, 800_000.0);
        assert_eq!(result.profit, 7_000_000.0);
        assert!((result.roi_percent - 53.846_153_846).abs() < 1e-6);
    }

    #[test]
    fn total_cost_is_area_times_rate_plus_conversion() {
        let cases = [
            (0.0, 0.0, 0.0),
            (1_200.0, 185.5, 40_000.0),
            (75_000.0, 0.0, 1_000_000.0),
            (12_345.0, 321.0, 0.0),
        ];
        for (sq_ft, rate, conversion) in cases {
            let mut inputs = scenario();
            inputs.building_sq_ft = sq_ft;
            inputs.cost_per_sq_ft = rate;
            inputs.conversion_costs = conversion;
            assert_eq!(
                evaluate(&inputs).total_development_cost,
                sq_ft * rate + conversion
            );
        }
    }

    #[test]
    fn noi_can_be_negative() {
        let mut inputs = scenario();
        inputs.rental_income = 100_000.0;
        inputs.operating_expenses = 250_000.0;
        assert_eq!(evaluate(&inputs).net_operating_income, -150_000.0);
    }

    #[test]
    fn roi_is_zero_without_development_cost() {
        let mut inputs = scenario();
        inputs.building_sq_ft = 0.0;
        inputs.conversion_costs = 0.0;
        let result = evaluate(&inputs);
        assert_eq!(result.total_development_cost, 0.0);
        assert_eq!(result.profit, 20_000_000.0);
        assert_eq!(result.roi_percent, 0.0);

        assert_eq!(return_on_investment(-5.0, 0.0), 0.0);
    }

    #[test]
    fn roi_goes_negative_when_sellout_misses_cost() {
        let mut inputs = scenario();
        inputs.condo_sellout = 6_500_000.0;
        let result = evaluate(&inputs);
        assert_eq!(result.profit, -6_500_000.0);
        assert_eq!(result.roi_percent, -50.0);
    }

    #[test]
    fn evaluation_is_idempotent_and_carries_unit_mix() {
        let mut inputs = scenario();
        inputs.unit_mix = parse_unit_mix("1BR:20,2BR:15").mix;
        let first = evaluate(&inputs);
        let second = evaluate(&inputs);
        assert_eq!(first, second);
        assert_eq!(first.unit_mix.get("2BR"), Some(15));
    }
}
