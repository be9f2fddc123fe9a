//! `movec`: compiles a scenario's movement intents and prints the resolved path.
//!
//! ```bash
//! MOVEC_SCENARIO=data/scenario.ron MOVEC_OUTPUT=json movec
//! MOVEC_SCENARIO=data/scenario.ron MOVEC_DESTINATION=6,2 movec
//! ```

use anyhow::{Context, Result};
use movement_cli::{CliConfig, OutputFormat, Report};
use movement_content::ScenarioLoader;
use movement_core::{SearchBudget, StepKind};
use planner::PlanningSession;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::info!(scenario = %config.scenario.display(), output = %config.output, "compiling scenario");

    let scenario = ScenarioLoader::load(&config.scenario, config.rules.as_deref())
        .with_context(|| format!("loading {}", config.scenario.display()))?;

    let budget = SearchBudget::default().with_time_limit(config.search_time);
    let mut session = PlanningSession::new(scenario.env())?.with_budget(budget);
    if let Some(careful) = scenario.careful {
        session.set_careful(careful)?;
    }
    for intent in scenario.intents.iter().cloned() {
        session.append(intent)?;
    }
    if let Some(destination) = config.destination {
        session.plan_to(destination, StepKind::Forward)?;
    }

    let report = Report::new(session.path(), session.env());
    match config.output {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    tracing::info!(valid = report.valid, total_mp = report.total_mp, "done");
    Ok(())
}
