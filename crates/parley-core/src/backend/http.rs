//! reqwest implementation of [`ChatBackend`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ChatBackend, ChatReply};
use crate::config::{normalize_base_url, ClientConfig};
use crate::models::{Attachment, Conversation, ConversationId, Message, PendingSend};
use crate::util::compact_text;
use crate::{Error, Result};

/// HTTP client for the chat backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Builds a client for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.base_url.clone())
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let response = self
            .client
            .get(self.url("/conversations"))
            .header("Accept", "application/json")
            .send()
            .await?;
        read_json(response).await
    }

    async fn list_messages(&self, id: ConversationId) -> Result<Vec<Message>> {
        tracing::debug!("Fetching messages for conversation {id}");
        let response = self
            .client
            .get(self.url(&conversation_path(id)))
            .header("Accept", "application/json")
            .send()
            .await?;
        read_json(response).await
    }

    async fn send_message(&self, pending: &PendingSend) -> Result<ChatReply> {
        tracing::debug!(
            "Posting message ({} attachments) to conversation {:?}",
            pending.attachments.len(),
            pending.conversation_id
        );
        let response = self
            .client
            .post(self.url("/chat"))
            .multipart(build_form(pending)?)
            .send()
            .await?;
        read_json(response).await
    }

    async fn create_conversation(&self) -> Result<Conversation> {
        let response = self
            .client
            .post(self.url("/conversation"))
            .header("Accept", "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await?;
        read_json(response).await
    }

    async fn rename_conversation(&self, id: ConversationId, title: &str) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("{}/title", conversation_path(id))))
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await?;
        expect_success(response).await
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&conversation_path(id)))
            .header("Accept", "application/json")
            .send()
            .await?;
        expect_success(response).await
    }
}

/// One multipart field of a `/chat` request.
#[derive(Debug, PartialEq, Eq)]
enum FormField<'a> {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        attachment: &'a Attachment,
    },
}

// `conversation_id` is omitted when there is no active conversation; the
// backend then creates one.
fn form_fields(pending: &PendingSend) -> Vec<FormField<'_>> {
    let mut fields = vec![FormField::Text {
        name: "message",
        value: pending.text.clone(),
    }];
    if let Some(id) = pending.conversation_id {
        fields.push(FormField::Text {
            name: "conversation_id",
            value: id.to_string(),
        });
    }
    fields.extend(
        pending
            .attachments
            .iter()
            .map(|attachment| FormField::File {
                name: "attachments[]",
                attachment,
            }),
    );
    fields
}

fn build_form(pending: &PendingSend) -> Result<Form> {
    let mut form = Form::new();
    for field in form_fields(pending) {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, attachment } => {
                let part = Part::bytes(attachment.file.bytes.clone())
                    .file_name(attachment.file.name.clone())
                    .mime_str(&attachment.file.mime_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn conversation_path(id: ConversationId) -> String {
    format!("/conversation/{id}")
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn body_error(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<ErrorBody>(body).ok()?;
    payload
        .error
        .or(payload.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

fn status_error(status: StatusCode, body: &str) -> Error {
    Error::Status {
        status: status.as_u16(),
        detail: body_error(body),
    }
}

fn parse_success_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    if let Some(message) = body_error(body) {
        return Err(Error::Backend(message));
    }
    serde_json::from_str(body).map_err(|error| {
        tracing::warn!("Unexpected response body: {}", compact_text(body));
        Error::Serialization(error)
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    parse_success_body(&body)
}

async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}
