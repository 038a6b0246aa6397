use clap::Parser;
use pokemon_report::utils::{logger, validation::Validate};
use pokemon_report::{
    CliConfig, FunTranslationsClient, LocalStorage, PokeApiClient, ReportEngine, ReportGenerator,
    ReportOutcome, ReportTemplate, Result, Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting pokemon-report CLI");

    // 載入並驗證配置
    let settings = match cli.resolve().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!(
        "Settings: pokemon={}, output={}/{}, html={}",
        settings.pokemon,
        settings.output_dir,
        settings.output,
        settings.html_file()
    );

    match run(&settings).await {
        Ok(outcome) => {
            // stdout 只輸出這一行
            println!("{}", outcome);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

async fn run(settings: &Settings) -> Result<ReportOutcome> {
    let template = match &settings.template {
        Some(path) => ReportTemplate::from_file(path)?,
        None => ReportTemplate::default(),
    };

    let lookup = PokeApiClient::new(settings.lookup_endpoint.clone()).with_timeout(settings.timeout());
    let translator = FunTranslationsClient::new(settings.translator_endpoint.clone())
        .with_api_key(settings.api_key.clone())
        .with_timeout(settings.timeout());
    let generator = ReportGenerator::new(LocalStorage::new(settings.output_dir.clone()))
        .with_template(template)
        .with_html_file(settings.html_file());

    let engine = ReportEngine::new(lookup, translator, generator);
    engine.run(&settings.request()).await
}
