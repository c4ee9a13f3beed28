use clap::Args;
use property_eval::config::AppConfig;
use property_eval::error::AppError;
use property_eval::evaluation::{
    evaluate, parse_unit_mix, EvaluationReport, ProjectForm, ProjectInputs, UnitMixParse,
};
use property_eval::market::{LookupOutcome, LookupRequest, MarketGateway, RentEstimateStub};

/// Project parameters accepted on the command line. Omitted values fall back
/// to the documented defaults.
#[derive(Args, Debug, Default)]
pub(crate) struct ProjectArgs {
    /// How the opportunity was discovered
    #[arg(long)]
    pub(crate) discovery: Option<String>,
    /// Validation notes
    #[arg(long)]
    pub(crate) validation: Option<String>,
    /// Creation notes
    #[arg(long)]
    pub(crate) creation: Option<String>,
    /// Relationship notes
    #[arg(long)]
    pub(crate) relationship: Option<String>,
    /// Current zoning
    #[arg(long)]
    pub(crate) zoning: Option<String>,
    /// Permitting process notes
    #[arg(long)]
    pub(crate) permitting_process: Option<String>,
    /// Demographic notes
    #[arg(long)]
    pub(crate) demographics: Option<String>,
    /// Net migration (U-Haul index)
    #[arg(long)]
    pub(crate) net_migration: Option<String>,
    /// Property address, used for the rent estimate
    #[arg(long)]
    pub(crate) address: Option<String>,
    /// State FIPS code, used for the Census lookup
    #[arg(long)]
    pub(crate) state_fips: Option<String>,
    /// County FIPS code, used for the Census lookup
    #[arg(long)]
    pub(crate) county_fips: Option<String>,
    /// Government programs (comma-separated)
    #[arg(long)]
    pub(crate) government_programs: Option<String>,
    /// Improvement districts (comma-separated)
    #[arg(long)]
    pub(crate) improvement_districts: Option<String>,
    /// Construction cost per square foot [default: 200]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) cost_per_sq_ft: Option<f64>,
    /// Average dwelling price for owners [default: 350000]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) avg_dwelling_price_own: Option<f64>,
    /// Building square footage [default: 50000]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) building_sq_ft: Option<f64>,
    /// Commercial units [default: 3]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) commercial_units: Option<i64>,
    /// Conversion costs [default: 3000000]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) conversion_costs: Option<f64>,
    /// Annual rental income [default: 1200000]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) rental_income: Option<f64>,
    /// Annual operating expenses [default: 400000]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) operating_expenses: Option<f64>,
    /// Total condo sell-out [default: 20000000]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) condo_sellout: Option<f64>,
    /// Occupancy rate in percent, 0-100 [default: 92]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) occupancy_rate: Option<i64>,
    /// Units by type, e.g. 1BR:20,2BR:15
    #[arg(long)]
    pub(crate) unit_mix: Option<String>,
}

impl From<ProjectArgs> for ProjectForm {
    fn from(args: ProjectArgs) -> Self {
        ProjectForm {
            discovery: args.discovery,
            validation: args.validation,
            creation: args.creation,
            relationship: args.relationship,
            zoning: args.zoning,
            permitting_process: args.permitting_process,
            demographics: args.demographics,
            net_migration: args.net_migration,
            property_address: args.address,
            state_fips: args.state_fips,
            county_fips: args.county_fips,
            government_programs: args.government_programs,
            improvement_districts: args.improvement_districts,
            cost_per_sq_ft: args.cost_per_sq_ft,
            avg_dwelling_price_own: args.avg_dwelling_price_own,
            building_sq_ft: args.building_sq_ft,
            commercial_units: args.commercial_units,
            conversion_costs: args.conversion_costs,
            rental_income: args.rental_income,
            operating_expenses: args.operating_expenses,
            condo_sellout: args.condo_sellout,
            occupancy_rate: args.occupancy_rate,
            unit_mix: args.unit_mix,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
    /// Replace the default median income with a Census lookup
    #[arg(long)]
    pub(crate) fetch_income: bool,
    /// Replace the default rent with the rent estimate lookup
    #[arg(long)]
    pub(crate) fetch_rent: bool,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct IncomeArgs {
    /// State FIPS code (e.g. 19 for Iowa)
    #[arg(long)]
    pub(crate) state_fips: String,
    /// County FIPS code (e.g. 153 for Polk County)
    #[arg(long)]
    pub(crate) county_fips: String,
}

#[derive(Args, Debug)]
pub(crate) struct RentArgs {
    /// Property address
    #[arg(long, default_value = "")]
    pub(crate) address: String,
}

#[derive(Args, Debug)]
pub(crate) struct UnitsArgs {
    /// Units by type, e.g. 1BR:20,2BR:15
    pub(crate) text: String,
}

pub(crate) async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        project,
        fetch_income,
        fetch_rent,
        json,
    } = args;

    let mut inputs = ProjectInputs::try_from(ProjectForm::from(project))?;
    let request = LookupRequest {
        median_income: fetch_income,
        rent_estimate: fetch_rent,
    };
    if request != LookupRequest::default() {
        let config = AppConfig::load()?;
        let gateway = MarketGateway::from_config(&config.market)?;
        let market = gateway.enrich(&inputs.site, request).await;
        inputs = inputs.with_market(market);
    }

    let result = evaluate(&inputs);
    let report = EvaluationReport::new(&inputs, &result);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&inputs, &report));
    }
    Ok(())
}

pub(crate) async fn run_income(args: IncomeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let gateway = MarketGateway::from_config(&config.market)?;
    let outcome = gateway
        .median_income(&args.state_fips, &args.county_fips)
        .await;
    println!("{}", render_lookup("Median Household Income", &outcome));
    Ok(())
}

pub(crate) fn run_rent(args: RentArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let outcome =
        RentEstimateStub.fetch_rent_estimate(&args.address, &config.market.zillow_api_key);
    println!("{}", render_lookup("Zillow Rent Zestimate", &outcome));
    Ok(())
}

pub(crate) fn run_units(args: UnitsArgs) -> Result<(), AppError> {
    println!("{}", render_unit_mix(&parse_unit_mix(&args.text)));
    Ok(())
}

pub(crate) fn render_lookup(label: &str, outcome: &LookupOutcome) -> String {
    match outcome.notice() {
        Some(notice) => format!("warning: {notice}\n{label}: {}", outcome.display_value()),
        None => format!("{label}: {}", outcome.display_value()),
    }
}

pub(crate) fn render_unit_mix(parsed: &UnitMixParse) -> String {
    let mut lines = Vec::new();
    for warning in &parsed.warnings {
        lines.push(format!("warning: {warning}"));
    }
    if parsed.mix.is_empty() {
        lines.push("Unit mix: none".to_string());
    } else {
        lines.push("Unit mix summary".to_string());
        lines.extend(parsed.mix.summary_lines().into_iter().map(|line| format!("- {line}")));
        lines.push(format!("Total: {} units", parsed.mix.total_units()));
    }
    lines.join("\n")
}

pub(crate) fn render_report(inputs: &ProjectInputs, report: &EvaluationReport) -> String {
    let mut lines = vec!["Property evaluation".to_string()];

    let narrative = &inputs.narrative;
    let notes = [
        ("Discovery", narrative.discovery.as_str()),
        ("Validation", narrative.validation.as_str()),
        ("Creation", narrative.creation.as_str()),
        ("Relationship", narrative.relationship.as_str()),
        ("Zoning", narrative.zoning.as_str()),
        ("Permitting process", narrative.permitting_process.as_str()),
        ("Demographics", narrative.demographics.as_str()),
        ("Net migration", narrative.net_migration.as_str()),
        ("Address", inputs.site.property_address.as_str()),
    ];
    let mut notes: Vec<String> = notes
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| format!("- {label}: {value}"))
        .collect();
    for (label, items) in [
        ("Government programs", &inputs.government_programs),
        ("Improvement districts", &inputs.improvement_districts),
    ] {
        if items.iter().any(|item| !item.is_empty()) {
            notes.push(format!("- {label}: {}", items.join(", ")));
        }
    }
    if !notes.is_empty() {
        lines.push("\nProject notes".to_string());
        lines.extend(notes);
    }

    lines.push("\nMetrics".to_string());
    for row in &report.metrics {
        lines.push(format!("- {}: {}", row.label, row.display));
    }

    if report.unit_mix.is_empty() {
        lines.push("\nUnit mix: none".to_string());
    } else {
        lines.push("\nUnit mix summary".to_string());
        lines.extend(report.unit_mix.iter().map(|line| format!("- {line}")));
    }

    if !report.warnings.is_empty() {
        lines.push("\nWarnings".to_string());
        lines.extend(report.warnings.iter().map(|warning| format!("- {warning}")));
    }

    lines.push("\nMarket data".to_string());
    for line in &report.market {
        lines.push(format!("- {}: {} ({})", line.label, line.display, line.status));
    }

    if !report.notices.is_empty() {
        lines.push("\nNotices".to_string());
        lines.extend(report.notices.iter().map(|notice| format!("- {notice}")));
    }

    lines.join("\n")
}
