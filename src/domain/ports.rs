use crate::domain::model::PokemonRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 回傳 `path` 在此儲存空間中的實際位置
    fn resolve(&self, path: &str) -> PathBuf;
}

#[async_trait]
pub trait PokemonLookup: Send + Sync {
    /// `Ok(None)` when the service has no such pokemon.
    async fn get_info(&self, name: &str) -> Result<Option<PokemonRecord>>;
}

#[async_trait]
pub trait NameTranslator: Send + Sync {
    async fn translate(&self, subject: &str) -> Result<String>;
}
