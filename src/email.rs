//! Email service for sending showroom access tokens.
//!
//! Two modes:
//! 1. Send via Resend API (when an API key is configured)
//! 2. Disabled (no key - log only, used in tests)

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Retry delays in seconds (exponential backoff: 1s, 4s, 16s)
const RETRY_DELAYS: &[u64] = &[1, 4, 16];

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Result of attempting to send an access token email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailSendResult {
    /// Email was sent successfully via Resend
    Sent,
    /// No API key configured, nothing sent
    Disabled,
}

/// Resend API request body.
#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    text: String,
    html: String,
}

/// Resend API response.
#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    #[allow(dead_code)]
    id: String,
}

/// Email service using Resend API.
#[derive(Clone)]
pub struct EmailService {
    /// Resend API key (from ENV); None disables sending
    api_key: Option<String>,
    /// "from" address (from ENV)
    from_email: String,
    /// HTTP client for API calls
    http_client: Client,
}

impl EmailService {
    pub fn new(api_key: Option<String>, from_email: String) -> Self {
        Self {
            api_key,
            from_email,
            http_client: Client::new(),
        }
    }

    /// Send one email listing every access token the recipient currently
    /// owns for an order. The full set is always sent, so a redelivered
    /// webhook or a manual resend repeats all codes, not only new ones.
    ///
    /// Fails fast, without contacting the API, when the recipient or the
    /// token list is empty. Must be called only after the ledger
    /// transaction has committed.
    pub async fn send_access_tokens(
        &self,
        to_email: &str,
        tokens: &[String],
    ) -> Result<EmailSendResult> {
        if to_email.trim().is_empty() {
            return Err(AppError::Mail("recipient address is empty".into()));
        }
        if tokens.is_empty() {
            return Err(AppError::Mail("no tokens to send".into()));
        }

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::info!(
                to = %to_email,
                tokens = tokens.len(),
                "Mail disabled (no API key), skipping access token email"
            );
            return Ok(EmailSendResult::Disabled);
        };

        let subject = if tokens.len() == 1 {
            "Your showroom access code".to_string()
        } else {
            format!("Your {} showroom access codes", tokens.len())
        };

        let mut text = String::from(
            "Thank you for your order!\n\nHere are your showroom access codes:\n\n",
        );
        for token in tokens {
            text.push_str(&format!("{}\n\n", token));
        }
        text.push_str(
            "Enter a code on the login page to open your showroom.\n\nIf you didn't expect this, you can ignore this email.",
        );

        let mut token_blocks = String::new();
        for token in tokens {
            token_blocks.push_str(&format!(
                r#"<div style="background: #f5f5f5; padding: 20px; border-radius: 8px; text-align: center; margin-bottom: 16px;">
<code style="font-size: 14px; font-weight: bold; letter-spacing: 1px; color: #333; word-break: break-all;">{}</code>
</div>"#,
                token
            ));
        }

        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
<h2 style="color: #333;">Thank you for your order!</h2>
<p>Here are your showroom access codes:</p>
{}
<p>Enter a code on the login page to open your showroom.</p>
<hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
<p style="color: #999; font-size: 12px;">If you didn't expect this, you can ignore this email.</p>
</body>
</html>"#,
            token_blocks
        );

        let request = ResendEmailRequest {
            from: &self.from_email,
            to: vec![to_email],
            subject,
            text,
            html,
        };

        self.send_request_with_retry(api_key, &request, to_email).await
    }

    /// Send a request to Resend API with exponential backoff retry.
    ///
    /// Retries on transient errors (network issues, 5xx, 429 rate limit).
    /// Fails immediately on non-transient errors (4xx except 429).
    async fn send_request_with_retry(
        &self,
        api_key: &str,
        request: &ResendEmailRequest<'_>,
        to_email: &str,
    ) -> Result<EmailSendResult> {
        let mut last_error: Option<AppError> = None;

        for (attempt, delay_secs) in std::iter::once(&0u64).chain(RETRY_DELAYS).enumerate() {
            // Sleep before retry (skip on first attempt)
            if *delay_secs > 0 {
                tracing::warn!(
                    attempt,
                    delay_secs,
                    "Retrying email send after transient failure"
                );
                tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
            }

            match self.send_resend_request(api_key, request).await {
                Ok(()) => {
                    if attempt > 0 {
                        tracing::info!(attempt, to = %to_email, "Email sent successfully after retry");
                    } else {
                        tracing::info!(to = %to_email, "Access token email sent via Resend");
                    }
                    return Ok(EmailSendResult::Sent);
                }
                Err((error, is_transient)) => {
                    if is_transient {
                        last_error = Some(error);
                        // Continue to next retry
                    } else {
                        return Err(error);
                    }
                }
            }
        }

        // All retries exhausted
        tracing::error!(
            to = %to_email,
            attempts = RETRY_DELAYS.len() + 1,
            "Email send failed after all retries"
        );
        Err(last_error
            .unwrap_or_else(|| AppError::Mail("all retries exhausted".into())))
    }

    /// Send a single request to Resend API.
    ///
    /// Returns Ok(()) on success, or Err((AppError, is_transient)) on failure.
    async fn send_resend_request(
        &self,
        api_key: &str,
        request: &ResendEmailRequest<'_>,
    ) -> std::result::Result<(), (AppError, bool)> {
        let response = self
            .http_client
            .post(RESEND_API_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send request to Resend API");
                // Network errors are transient
                (AppError::Mail(format!("request failed: {}", e)), true)
            })?;

        let status = response.status();

        if status.is_success() {
            let _result: ResendEmailResponse = response.json().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to parse Resend API response");
                (AppError::Mail("unexpected API response".into()), false)
            })?;
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();

            let is_transient = status.as_u16() == 429 // Rate limited
                || status.is_server_error(); // 5xx errors

            if is_transient {
                tracing::warn!(
                    status = %status,
                    body = %body,
                    "Resend API returned transient error"
                );
            } else {
                tracing::error!(
                    status = %status,
                    body = %body,
                    "Resend API returned non-transient error"
                );
            }

            Err((
                AppError::Mail(format!("{} - {}", status, body)),
                is_transient,
            ))
        }
    }
}
