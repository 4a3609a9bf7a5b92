use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests for the loaders; lets tests and wrappers swap the
/// transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
