use crate::credentials::GoogleCredentials;
use http::Extensions;
use reqwest::{header, Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Attaches a service-account bearer token to every outgoing request.
#[derive(Clone)]
pub struct AuthMiddleware {
    credentials: GoogleCredentials,
}

impl AuthMiddleware {
    pub fn new(credentials: GoogleCredentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &GoogleCredentials {
        &self.credentials
    }
}

#[async_trait::async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let token = self.credentials.access_token().await.map_err(|e| {
            reqwest_middleware::Error::Middleware(anyhow::anyhow!("Failed to get auth token: {}", e))
        })?;

        let value = header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            reqwest_middleware::Error::Middleware(anyhow::anyhow!("Invalid auth token: {}", e))
        })?;
        req.headers_mut().insert(header::AUTHORIZATION, value);

        next.run(req, extensions).await
    }
}
