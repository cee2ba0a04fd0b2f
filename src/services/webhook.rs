//! Outbound webhook dispatch.
//!
//! Fired after successful identity creation, outside the provisioning
//! transaction. Delivery failures are logged and swallowed; they must never
//! roll back or fail the request that triggered them.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::WebhookConfig;
use crate::entity::user;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

#[derive(Debug, Serialize)]
struct MemberRegisteredPayload {
    event: &'static str,
    timestamp: String,
    data: MemberData,
}

#[derive(Debug, Serialize)]
struct MemberData {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
}

/// Dispatches registration webhooks. Cheap to clone; holds a shared client.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
    secret: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client for webhooks");

        Self {
            client,
            url: config.url.clone(),
            secret: config.secret.clone(),
        }
    }

    /// Send the member-registered event for a newly provisioned user.
    pub async fn member_registered(&self, user: &user::Model) {
        let Some(url) = self.url.as_deref() else {
            debug!("Webhook URL not configured, skipping member registration webhook");
            return;
        };

        let payload = MemberRegisteredPayload {
            event: "member.registered",
            timestamp: Utc::now().to_rfc3339(),
            data: MemberData {
                id: user.id.to_string(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email: user.email.clone(),
            },
        };

        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to encode member registration webhook payload: {}", e);
                return;
            }
        };

        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(signature) = self.sign(&body) {
            request = request.header(SIGNATURE_HEADER, signature);
        }

        match request.body(body).send().await {
            Ok(response) if response.status().is_success() => {
                info!(
                    "Member registration webhook sent successfully for user {}",
                    user.id
                );
            }
            Ok(response) => {
                warn!(
                    "Member registration webhook returned non-success status: {}",
                    response.status()
                );
            }
            Err(e) => {
                error!("Failed to send member registration webhook: {}", e);
            }
        }
    }

    fn sign(&self, body: &[u8]) -> Option<String> {
        let secret = self.secret.as_deref()?;
        if secret.is_empty() {
            debug!("Webhook secret not configured, skipping signature");
            return None;
        }

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        Some(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WebhookConfig;

    #[test]
    fn test_signature_format() {
        let notifier = WebhookNotifier::new(&WebhookConfig {
            url: Some("https://hooks.example.com".to_string()),
            secret: Some("shared-secret".to_string()),
        });

        let sig = notifier.sign(b"{}").expect("signature expected");
        assert!(sig.starts_with("sha256="));
        // 32 bytes of HMAC-SHA256 hex-encoded
        assert_eq!(sig.len(), "sha256=".len() + 64);

        // Same body, same key, same signature
        assert_eq!(sig, notifier.sign(b"{}").unwrap());
        assert_ne!(sig, notifier.sign(b"{\"a\":1}").unwrap());
    }

    #[test]
    fn test_no_secret_no_signature() {
        let notifier = WebhookNotifier::new(&WebhookConfig {
            url: Some("https://hooks.example.com".to_string()),
            secret: None,
        });
        assert!(notifier.sign(b"{}").is_none());
    }
}
