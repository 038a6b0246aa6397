#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::FileConfig;

use crate::adapters::funtranslations::DEFAULT_TRANSLATOR_ENDPOINT;
use crate::adapters::pokeapi::DEFAULT_LOOKUP_ENDPOINT;
use crate::domain::model::ReportRequest;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_POKEMON: &str = "pikachu";
pub const DEFAULT_OUTPUT: &str = "pokemon_report.pdf";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// 合併 CLI、TOML 與預設值後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub pokemon: String,
    pub lookup_endpoint: String,
    pub translator_endpoint: String,
    pub translate_subject: Option<String>,
    pub api_key: Option<String>,
    pub output: String,
    pub output_dir: String,
    pub html_output: Option<String>,
    pub template: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pokemon: DEFAULT_POKEMON.to_string(),
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            translator_endpoint: DEFAULT_TRANSLATOR_ENDPOINT.to_string(),
            translate_subject: None,
            api_key: None,
            output: DEFAULT_OUTPUT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            html_output: None,
            template: None,
            timeout_seconds: None,
        }
    }
}

impl Settings {
    /// 套用 TOML 設定檔中有填寫的欄位
    pub fn apply_file(&mut self, file: &FileConfig) {
        let FileConfig {
            lookup,
            translator,
            report,
            http,
        } = file.clone();

        if let Some(pokemon) = lookup.pokemon {
            self.pokemon = pokemon;
        }
        if let Some(endpoint) = lookup.endpoint {
            self.lookup_endpoint = endpoint;
        }
        if let Some(endpoint) = translator.endpoint {
            self.translator_endpoint = endpoint;
        }
        if translator.subject.is_some() {
            self.translate_subject = translator.subject;
        }
        if translator.api_key.is_some() {
            self.api_key = translator.api_key;
        }
        if let Some(output) = report.output {
            self.output = output;
        }
        if let Some(output_dir) = report.output_dir {
            self.output_dir = output_dir;
        }
        if report.html_output.is_some() {
            self.html_output = report.html_output;
        }
        if report.template.is_some() {
            self.template = report.template;
        }
        if http.timeout_seconds.is_some() {
            self.timeout_seconds = http.timeout_seconds;
        }
    }

    /// Intermediate HTML file; defaults to the PDF name with an `.html` extension.
    pub fn html_file(&self) -> String {
        self.html_output.clone().unwrap_or_else(|| {
            Path::new(&self.output)
                .with_extension("html")
                .to_string_lossy()
                .into_owned()
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn request(&self) -> ReportRequest {
        ReportRequest {
            pokemon: self.pokemon.clone(),
            translate_subject: self.translate_subject.clone(),
            output: self.output.clone(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("lookup.pokemon", &self.pokemon)?;
        validation::validate_url("lookup.endpoint", &self.lookup_endpoint)?;
        validation::validate_placeholder("lookup.endpoint", &self.lookup_endpoint, "{name}")?;
        validation::validate_url("translator.endpoint", &self.translator_endpoint)?;
        if let Some(subject) = &self.translate_subject {
            validation::validate_non_empty_string("translator.subject", subject)?;
        }

        validation::validate_path("report.output", &self.output)?;
        validation::validate_path("report.output_dir", &self.output_dir)?;
        let html_file = self.html_file();
        validation::validate_path("report.html_output", &html_file)?;
        if html_file == self.output {
            return Err(ReportError::ConfigValidationError {
                field: "report.html_output".to_string(),
                message: "HTML output would overwrite the PDF output".to_string(),
            });
        }
        if let Some(template) = &self.template {
            validation::validate_path("report.template", template)?;
        }

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
