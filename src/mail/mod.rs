//! Outbound mail. Delivery is a collaborator; the shipped mailer only logs.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> AppResult<()>;
}

/// Writes each message to the log instead of delivering it.
#[derive(Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> AppResult<()> {
        info!(to = %email.to, subject = %email.subject, body = %email.body, "outbound email");
        Ok(())
    }
}

/// Keeps sent messages in memory so callers can inspect them.
#[derive(Clone, Default)]
pub struct OutboxMailer {
    sent: Arc<Mutex<Vec<Email>>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<Email> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, email: Email) -> AppResult<()> {
        self.sent.lock().await.push(email);
        Ok(())
    }
}

/// Message asking a new user to confirm their address.
pub fn confirmation_email(to: &str, base_url: &str, token: &str) -> Email {
    let link = format!("{}/confirm-email?token={}", base_url, token);
    Email {
        to: to.to_string(),
        subject: "Confirm your email".to_string(),
        body: format!(
            "Please confirm your email by clicking the following link: {}",
            link
        ),
    }
}
