use anyhow::Result;
use serde::Serialize;
use tracing::debug;

/// External service that owns kit contents and performs the actual grant.
/// The dispatcher never inspects kit contents; it only forwards the request.
pub trait KitGrantService: Send + Sync {
    fn is_available(&self) -> impl Future<Output = bool> + Send;
    fn grant(&self, user_id: u64, kit: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Serialize)]
struct GrantRequest<'a> {
    player_id: u64,
    kit: &'a str,
}

/// Kit service reachable over HTTP. Availability is a health probe; a grant
/// is a single POST, and any non-2xx response counts as a rejection.
pub struct HttpKitService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpKitService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl KitGrantService for HttpKitService {
    async fn is_available(&self) -> bool {
        match self.client.get(self.endpoint("health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Kit service health probe failed: {}", e);
                false
            }
        }
    }

    async fn grant(&self, user_id: u64, kit: &str) -> Result<()> {
        let request = GrantRequest { player_id: user_id, kit };
        let response = self
            .client
            .post(self.endpoint("kits/grant"))
            .json(&request)
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_tolerate_trailing_slashes() {
        let service = HttpKitService::new("http://127.0.0.1:8525/");
        assert_eq!(service.endpoint("health"), "http://127.0.0.1:8525/health");
        assert_eq!(
            service.endpoint("kits/grant"),
            "http://127.0.0.1:8525/kits/grant"
        );
    }
}
