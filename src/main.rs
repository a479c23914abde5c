use anyhow::Context;
use clap::Parser;
use revenue_projector::core::ChartRenderer;
use revenue_projector::utils::{logger, validation::Validate};
use revenue_projector::{
    ChartConfig, ChartFrame, CliConfig, LocalStorage, OutputPipeline, ProjectionEngine,
    TableRenderer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting revenue-projector CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證參數
    if let Err(e) = config.validate() {
        tracing::error!("❌ Parameter validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let parameters = config.projection_parameters();
    let series = parameters.project();
    let frame = ChartFrame::build(&series, parameters.series_len(), &ChartConfig::default());

    let mut table = TableRenderer::new(std::io::stdout().lock());
    table
        .render(&frame)
        .context("failed to print projection table")?;
    drop(table);

    let Some(output_path) = config.output_path.clone() else {
        return Ok(());
    };

    // 有指定輸出目錄時才寫檔
    let storage = LocalStorage::new(output_path);
    let pipeline = OutputPipeline::new(storage, config);
    let engine = ProjectionEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Projection completed successfully!");
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Projection failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
