//! Outbound mail boundary.
//!
//! Failures are reported to the caller and never retried here; whatever
//! queued the send decides what to log.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::prelude::*;

#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> anyhow::Result<()>;
}

pub struct Smtp {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  from: Mailbox,
}

impl Smtp {
  pub fn new(host: &str, username: String, password: String, from: &str) -> anyhow::Result<Self> {
    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
      .context("invalid SMTP relay host")?
      .credentials(Credentials::new(username, password))
      .build();

    let from = from.parse::<Mailbox>().context("invalid MAIL_FROM address")?;

    Ok(Self { transport, from })
  }
}

#[async_trait]
impl Mailer for Smtp {
  async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> anyhow::Result<()> {
    let mut builder = Message::builder().from(self.from.clone()).subject(subject);
    for recipient in recipients {
      builder = builder.to(recipient.parse().context("invalid recipient address")?);
    }

    let message = builder.body(body.to_string()).context("failed to build message")?;
    self.transport.send(message).await.context("SMTP send failed")?;

    Ok(())
  }
}

#[cfg(test)]
pub mod testing {
  use std::sync::Mutex;

  use super::*;

  #[derive(Debug, Clone)]
  pub struct SentMail {
    pub subject: String,
    pub body: String,
    pub recipients: Vec<String>,
  }

  /// Records every send instead of talking to a relay.
  #[derive(Default)]
  pub struct Recording {
    pub sent: Mutex<Vec<SentMail>>,
  }

  #[async_trait]
  impl Mailer for Recording {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> anyhow::Result<()> {
      self.sent.lock().unwrap().push(SentMail {
        subject: subject.into(),
        body: body.into(),
        recipients: recipients.to_vec(),
      });
      Ok(())
    }
  }
}
