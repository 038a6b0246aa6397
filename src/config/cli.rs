use crate::config::{FileConfig, Settings};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pokemon-report")]
#[command(about = "Look up a pokemon and render a translated PDF report")]
pub struct CliConfig {
    /// Pokemon to look up
    #[arg(long)]
    pub pokemon: Option<String>,

    /// Lookup endpoint template containing {name}
    #[arg(long)]
    pub lookup_endpoint: Option<String>,

    #[arg(long)]
    pub translator_endpoint: Option<String>,

    /// Fixed text to translate instead of the pokemon's own name
    #[arg(long)]
    pub translate_subject: Option<String>,

    #[arg(long, env = "FUNTRANSLATIONS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// PDF file name, relative to --output-dir
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub output_dir: Option<String>,

    /// Intermediate HTML file name, relative to --output-dir
    #[arg(long)]
    pub html_output: Option<String>,

    /// Custom HTML template file
    #[arg(long)]
    pub template: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 優先順序：命令列 > TOML 設定檔 > 預設值
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            settings.apply_file(&FileConfig::from_file(path)?);
        }

        let overrides = self.clone();
        if let Some(pokemon) = overrides.pokemon {
            settings.pokemon = pokemon;
        }
        if let Some(endpoint) = overrides.lookup_endpoint {
            settings.lookup_endpoint = endpoint;
        }
        if let Some(endpoint) = overrides.translator_endpoint {
            settings.translator_endpoint = endpoint;
        }
        if overrides.translate_subject.is_some() {
            settings.translate_subject = overrides.translate_subject;
        }
        if overrides.api_key.is_some() {
            settings.api_key = overrides.api_key;
        }
        if let Some(output) = overrides.output {
            settings.output = output;
        }
        if let Some(output_dir) = overrides.output_dir {
            settings.output_dir = output_dir;
        }
        if overrides.html_output.is_some() {
            settings.html_output = overrides.html_output;
        }
        if overrides.template.is_some() {
            settings.template = overrides.template;
        }
        if overrides.timeout_seconds.is_some() {
            settings.timeout_seconds = overrides.timeout_seconds;
        }

        Ok(settings)
    }
}
