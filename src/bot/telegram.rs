//! Minimal Telegram Bot API transport.
//!
//! # Responsibilities
//! - Long-poll getUpdates and forward message text to the command layer
//! - Send replies via sendMessage
//! - Keep the loop alive across transport failures (log and back off)
//!
//! # Security
//! - The bot token is part of every request URL and must never be logged

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::bot::commands::{respond, BotContext};
use crate::wallet::gateway::RpcGateway;

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Pause before re-polling after a transport failure.
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Errors from the Telegram transport.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram transport error: {0}")]
    Transport(String),

    #[error("telegram API error: {0}")]
    Api(String),
}

/// An incoming update, trimmed to the fields the bot uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

/// Thin client over the Bot API HTTP surface.
pub struct TelegramApi {
    http: reqwest::Client,
    base: String,
    poll_timeout_secs: u64,
}

impl TelegramApi {
    /// Build a client for one bot token. The HTTP timeout leaves room
    /// for the long-poll window.
    pub fn new(token: &str, poll_timeout_secs: u64) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()
            .map_err(|e| TelegramError::Transport(format!("HTTP client init: {}", e)))?;

        Ok(Self {
            http,
            base: format!("https://api.telegram.org/bot{}", token),
            poll_timeout_secs,
        })
    }

    async fn call<T: DeserializeOwned + Default>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, TelegramError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base, method))
            .json(&params)
            .send()
            .await
            .map_err(|e| TelegramError::Transport(format!("{}: {}", method, e)))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TelegramError::Transport(format!("{}: {}", method, e)))?;

        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| format!("{} failed without description", method)),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::Api(format!("{}: ok response without result", method)))
    }

    /// Fetch updates newer than `offset`, blocking server-side up to the
    /// poll timeout.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            json!({ "offset": offset, "timeout": self.poll_timeout_secs }),
        )
        .await
    }

    /// Discard every update queued while the bot was offline, returning
    /// the offset to poll from.
    ///
    /// Uses the Bot API's negative-offset semantics: `offset = -1` asks
    /// for only the newest pending update, which confirms everything
    /// before it. Stale commands (a queued /transfer in particular) must
    /// never be dispatched on restart.
    pub async fn skip_pending_updates(&self) -> Result<i64, TelegramError> {
        let updates: Vec<Update> = self
            .call("getUpdates", json!({ "offset": -1, "timeout": 0 }))
            .await?;

        if !updates.is_empty() {
            tracing::info!("Discarding updates queued while offline");
        }

        Ok(next_offset(0, &updates))
    }

    /// Send a plain-text reply to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        // The returned Message is not needed; deserialize and drop it.
        let _: Value = self
            .call("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token is embedded in `base` and stays out of Debug output.
        f.debug_struct("TelegramApi")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

/// Advance the poll offset past every update in a batch.
fn next_offset(offset: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|update| update.update_id + 1)
        .fold(offset, i64::max)
}

/// Run the polling loop forever, dispatching each message through the
/// command layer. The pending backlog is discarded first so commands
/// sent while the bot was offline are never executed.
pub async fn run<G: RpcGateway>(api: &TelegramApi, ctx: &BotContext<G>) -> ! {
    let mut offset: i64 = loop {
        match api.skip_pending_updates().await {
            Ok(offset) => break offset,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to skip pending updates, backing off");
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
        }
    };

    tracing::info!(offset, "Polling for updates");

    loop {
        let updates = match api.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(RETRY_BACKOFF).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let Some(message) = update.message else { continue };
            let Some(text) = message.text.as_deref() else { continue };

            if let Some(reply) = respond(ctx, text).await {
                if let Err(e) = api.send_message(message.chat.id, &reply).await {
                    tracing::warn!(chat_id = message.chat.id, error = %e, "Failed to send reply");
                }
            }
        }
    }
}
