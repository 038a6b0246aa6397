use crate::domain::model::PokemonRecord;
use crate::domain::ports::PokemonLookup;
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://pokeapi.co/api/v2/pokemon/{name}";

const SERVICE: &str = "pokeapi";

#[derive(Debug, Deserialize)]
struct PokeApiPokemon {
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

impl From<PokeApiPokemon> for PokemonRecord {
    fn from(pokemon: PokeApiPokemon) -> Self {
        Self {
            name: pokemon.name,
            height: pokemon.height,
            weight: pokemon.weight,
            abilities: pokemon
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
        }
    }
}

/// PokéAPI 查詢客戶端
pub struct PokeApiClient {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl PokeApiClient {
    /// `endpoint` is a URL template with a `{name}` placeholder.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 替換端點中的 `{name}` 佔位符
    fn build_endpoint(&self, name: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(name.trim().as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        self.endpoint.replace("{name}", &encoded)
    }
}

#[async_trait]
impl PokemonLookup for PokeApiClient {
    async fn get_info(&self, name: &str) -> Result<Option<PokemonRecord>> {
        let endpoint = self.build_endpoint(name);
        tracing::debug!("📡 Looking up '{}' at {}", name, endpoint);

        let mut request = self.client.get(&endpoint);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} response status: {}", SERVICE, status);

        if status == StatusCode::NOT_FOUND {
            tracing::info!("🔍 '{}' is unknown to {}", name, SERVICE);
            return Ok(None);
        }

        if !status.is_success() {
            return Err(ReportError::ServiceError {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let pokemon: PokeApiPokemon =
            serde_json::from_str(&body).map_err(|e| ReportError::UnexpectedResponse {
                service: SERVICE.to_string(),
                message: e.to_string(),
            })?;

        let record = PokemonRecord::from(pokemon);
        tracing::info!(
            "✅ Found {} (height {}, weight {}, {} abilities)",
            record.name,
            record.height,
            record.weight,
            record.abilities.len()
        );
        Ok(Some(record))
    }
}
