// Adapters layer: concrete implementations for external systems (storage, http services).

pub mod funtranslations;
pub mod pokeapi;
pub mod storage;

pub use funtranslations::FunTranslationsClient;
pub use pokeapi::PokeApiClient;
pub use storage::LocalStorage;
