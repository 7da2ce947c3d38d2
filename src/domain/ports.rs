use crate::domain::model::{Conversion, OutputFormat};
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
    fn input_path(&self) -> &str;
    /// `None` means the document goes to standard output.
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn root_tag(&self) -> &str;
    fn item_tag(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<String>;
    async fn transform(&self, text: String) -> Result<Conversion>;
    async fn load(&self, result: Conversion) -> Result<String>;
}
