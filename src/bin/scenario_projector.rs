use clap::Parser;
use revenue_projector::core::chart::format_tooltip_revenue;
use revenue_projector::core::ParameterSource;
use revenue_projector::utils::{logger, validation::Validate};
use revenue_projector::{LocalStorage, OutputPipeline, ProjectionEngine, ScenarioConfig};

#[derive(Parser)]
#[command(name = "scenario-projector")]
#[command(about = "Project tax revenue for every scenario in a TOML file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "scenarios.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Only run the named scenario
    #[arg(long)]
    scenario: Option<String>,

    /// Dry run - show what would be projected without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting scenario projector");
    tracing::info!("📁 Loading scenarios from: {}", args.config);

    let config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let scenarios: Vec<_> = match &args.scenario {
        Some(name) => match config.find_scenario(name) {
            Some(scenario) => vec![scenario.clone()],
            None => {
                eprintln!("❌ Scenario '{}' not found in {}", name, args.config);
                std::process::exit(1);
            }
        },
        None => config.enabled_scenarios().cloned().collect(),
    };

    tracing::info!(
        "✅ Loaded project '{}' with {} scenario(s) to run",
        config.project.name,
        scenarios.len()
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        for scenario in &scenarios {
            let params = scenario.parameters();
            let series = params.project();
            println!(
                "{}: {} years, final year {}",
                scenario.name,
                series.len(),
                series
                    .last()
                    .map(|&v| format_tooltip_revenue(v))
                    .unwrap_or_else(|| "-".to_string())
            );
        }
        return Ok(());
    }

    let mut failures = 0;
    for scenario in &scenarios {
        let source = config.source_for(scenario);
        let storage = LocalStorage::new(source.output_path().to_string());
        let pipeline = OutputPipeline::new(storage, source).with_chart_config(config.chart_config());
        let engine = ProjectionEngine::new(pipeline);

        match engine.run().await {
            Ok(report) => {
                println!(
                    "✅ {}: {} years, cumulative {} -> {}",
                    scenario.name,
                    report.years,
                    format_tooltip_revenue(report.cumulative_revenue),
                    report.output_path
                );
            }
            Err(e) => {
                failures += 1;
                tracing::error!(
                    "❌ Scenario '{}' failed: {} (Category: {:?}, Severity: {:?})",
                    scenario.name,
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}: {}", scenario.name, e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
            }
        }
    }

    if failures > 0 {
        tracing::error!("{} of {} scenario(s) failed", failures, scenarios.len());
        std::process::exit(1);
    }

    Ok(())
}
