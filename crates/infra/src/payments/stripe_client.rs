use std::time::Duration;

use anyhow::Result;
use application::interfaces::payments::{PaymentEvent, PaymentGateway};
use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use sha2::Sha256;
use tracing::error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const STRIPE_API: &str = "https://api.stripe.com/v1";

/// Maximum age of a signed webhook, in seconds.
pub const WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Minimal Stripe client built on reqwest.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeEvent {
    id: Option<String>,
    #[serde(rename = "type")]
    type_: String,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorDetails,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
    param: Option<String>,
}

#[derive(Deserialize)]
struct IdResp {
    id: String,
}

impl StripeClient {
    pub fn new(secret_key: String, webhook_secret: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            secret_key,
            webhook_secret,
        })
    }

    async fn ensure_success(
        resp: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("request-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let details = serde_json::from_str::<StripeErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);

        error!(
            status = %status,
            stripe_request_id = ?request_id,
            stripe_error_type = ?details.as_ref().and_then(|d| d.type_.as_deref()),
            stripe_error_code = ?details.as_ref().and_then(|d| d.code.as_deref()),
            stripe_error_param = ?details.as_ref().and_then(|d| d.param.as_deref()),
            stripe_error_message = ?details.as_ref().and_then(|d| d.message.as_deref()),
            context = %context,
            "stripe: api request failed"
        );

        anyhow::bail!(
            "Stripe API request failed: {} (status {}, request_id={:?})",
            context,
            status,
            request_id
        );
    }

    async fn post_form(
        &self,
        path: &str,
        body: &[(&str, String)],
        context: &str,
    ) -> Result<reqwest::Response> {
        let resp = self
            .http
            .post(format!("{STRIPE_API}{path}"))
            .header(AUTHORIZATION, format!("Bearer {}", self.secret_key))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(body)
            .send()
            .await?;
        Self::ensure_success(resp, context).await
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_customer(&self, email: &str, name: &str, user_id: Uuid) -> Result<String> {
        // https://stripe.com/docs/api/customers/create
        let body = [
            ("email", email.to_string()),
            ("name", name.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];
        let resp = self.post_form("/customers", &body, "create customer").await?;

        let parsed: IdResp = resp.json().await?;
        Ok(parsed.id)
    }

    async fn create_trial_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
        trial_days: i64,
    ) -> Result<String> {
        // https://stripe.com/docs/billing/subscriptions/trials
        let body = [
            ("customer", customer_id.to_string()),
            ("items[0][price]", price_id.to_string()),
            ("trial_period_days", trial_days.to_string()),
            (
                "trial_settings[end_behavior][missing_payment_method]",
                "cancel".to_string(),
            ),
        ];
        let resp = self
            .post_form("/subscriptions", &body, "create trial subscription")
            .await?;

        let parsed: IdResp = resp.json().await?;
        Ok(parsed.id)
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<()> {
        // https://stripe.com/docs/api/subscriptions/cancel#cancel_subscription-at_period_end
        let body = [("cancel_at_period_end", "true".to_string())];
        self.post_form(
            &format!("/subscriptions/{subscription_id}"),
            &body,
            "cancel subscription",
        )
        .await?;

        Ok(())
    }

    fn verify_webhook(&self, payload: &[u8], signature: &str) -> Result<PaymentEvent> {
        verify_webhook_signature(
            &self.webhook_secret,
            payload,
            signature,
            Utc::now().timestamp(),
        )
    }
}

/// Verifies a `Stripe-Signature` header. https://stripe.com/docs/webhooks/signatures
pub fn verify_webhook_signature(
    webhook_secret: &str,
    payload: &[u8],
    signature_header: &str,
    now_ts: i64,
) -> Result<PaymentEvent> {
    let mut timestamp: Option<&str> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in signature_header.split(',') {
        let part = part.trim();
        if let Some(rest) = part.strip_prefix("t=") {
            timestamp = Some(rest);
        } else if let Some(rest) = part.strip_prefix("v1=") {
            signatures.push(rest);
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| anyhow::anyhow!("missing timestamp in stripe-signature"))?;
    if signatures.is_empty() {
        anyhow::bail!("missing v1 in stripe-signature");
    }

    let signed_at: i64 = timestamp.parse()?;
    if (now_ts - signed_at).abs() > WEBHOOK_TOLERANCE_SECS {
        anyhow::bail!("webhook timestamp outside tolerance");
    }

    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes())?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|signature| {
        hex::decode(signature)
            .map(|provided| mac.clone().verify_slice(&provided).is_ok())
            .unwrap_or(false)
    });
    if !matched {
        anyhow::bail!("invalid webhook signature");
    }

    let event: StripeEvent = serde_json::from_slice(payload)?;
    Ok(PaymentEvent {
        id: event.id,
        event_type: event.type_,
        object: event.data.object,
    })
}
