use super::Firetor;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

#[async_trait::async_trait]
impl Middleware for Firetor {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let app = self.intercept().await.map_err(|e| {
            reqwest_middleware::Error::Middleware(anyhow::anyhow!("Firebase initialization failed: {}", e))
        })?;

        if let Some(app) = app {
            extensions.insert(app);
        }

        next.run(req, extensions).await
    }
}
