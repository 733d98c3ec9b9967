use crate::domain::model::Catalog;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Origin the share links are built against, e.g. `https://portfolio.example.com`.
    fn base_url(&self) -> &str;
    /// Path of the public read-only view, e.g. `/p`.
    fn public_path(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog>;

    fn describe(&self) -> String;
}
