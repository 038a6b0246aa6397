pub mod engine;

pub use crate::domain::model::{PokemonRecord, ReportOutcome, ReportRequest};
pub use crate::domain::ports::{NameTranslator, PokemonLookup, Storage};
pub use crate::utils::error::Result;
