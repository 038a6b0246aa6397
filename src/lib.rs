pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;

pub use adapters::{FunTranslationsClient, LocalStorage, PokeApiClient};
pub use crate::core::engine::ReportEngine;
pub use domain::model::{PokemonRecord, ReportOutcome, ReportRequest};
pub use domain::ports::{NameTranslator, PokemonLookup, Storage};
pub use report::{ReportGenerator, ReportTemplate};
pub use utils::error::{ReportError, Result};
