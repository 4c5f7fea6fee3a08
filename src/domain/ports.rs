use crate::core::session::Session;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location of `path` as shown to the user after a successful write.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    /// Absent until first use of the document-store exporter, which then fails.
    fn document_store_uri(&self) -> Option<&str>;
    fn database(&self) -> &str;
    fn collection(&self) -> &str;
    fn data_source(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
}

#[async_trait]
pub trait Exporter: Send + Sync {
    /// Short target name used in notifications, e.g. `"csv"`.
    fn target(&self) -> &'static str;
    /// Serializes the session and returns where the result was saved.
    async fn export(&self, session: &Session) -> Result<String>;
}
