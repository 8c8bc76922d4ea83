use std::path::Path;
use std::sync::Arc;

use parley_core::backend::HttpBackend;
use parley_core::config::{
    normalize_base_url, normalize_text_option, ClientConfig, DEFAULT_BASE_URL, ENV_BASE_URL,
};
use parley_core::util::compact_text;
use parley_core::{ChatSession, Conversation, ConversationId, FileBlob, Message};
use serde::Serialize;

use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

/// Global flags that decide which backend to talk to.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub base_url: Option<String>,
    pub profile: Option<String>,
}

/// Where the resolved base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    Flag,
    Environment,
    Profile,
    Default,
}

impl BaseUrlSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flag => "--base-url",
            Self::Environment => ENV_BASE_URL,
            Self::Profile => "profile",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConversationListItem {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct MessageItem {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

/// First of flag, environment, profile, default that is set.
pub fn select_base_url(
    flag: Option<String>,
    from_env: Option<String>,
    from_profile: Option<String>,
) -> Result<(String, BaseUrlSource), CliError> {
    let (raw, source) = normalize_text_option(flag)
        .map(|url| (url, BaseUrlSource::Flag))
        .or_else(|| normalize_text_option(from_env).map(|url| (url, BaseUrlSource::Environment)))
        .or_else(|| normalize_text_option(from_profile).map(|url| (url, BaseUrlSource::Profile)))
        .unwrap_or_else(|| (DEFAULT_BASE_URL.to_string(), BaseUrlSource::Default));

    let base_url = normalize_base_url(&raw)
        .map_err(|error| CliError::Config(format!("{} ({})", error, source.label())))?;
    Ok((base_url, source))
}

pub fn resolve_base_url(connection: &ConnectionArgs) -> Result<(String, BaseUrlSource), CliError> {
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = profiles.resolve_profile_name(connection.profile.as_deref());
    let from_profile = profiles.profile(&profile_name).and_then(|p| p.base_url());
    let from_env = ClientConfig::from_env()
        .map_err(|error| CliError::Config(format!("{error} ({ENV_BASE_URL})")))?
        .map(|config| config.base_url);

    select_base_url(connection.base_url.clone(), from_env, from_profile)
}

pub fn open_session(
    connection: &ConnectionArgs,
    presenter: TerminalPresenter,
) -> Result<ChatSession, CliError> {
    let (base_url, source) = resolve_base_url(connection)?;
    tracing::debug!("Using backend {base_url} (from {})", source.label());

    let backend = HttpBackend::from_config(&ClientConfig::new(base_url)?)?;
    Ok(ChatSession::new(Arc::new(backend), Arc::new(presenter)))
}

pub fn parse_conversation_id(raw: &str) -> Result<ConversationId, CliError> {
    raw.parse::<ConversationId>()
        .map_err(|_| CliError::InvalidConversationId(raw.trim().to_string()))
}

/// Map a session failure that the presenter already printed.
pub fn reported<T>(result: parley_core::Result<T>) -> Result<T, CliError> {
    result.map_err(|error| {
        tracing::debug!("Operation failed: {error}");
        CliError::Reported
    })
}

pub fn read_attachment(path: &Path) -> Result<FileBlob, CliError> {
    FileBlob::read(path).map_err(|error| CliError::Attachment {
        path: path.display().to_string(),
        reason: error.to_string(),
    })
}

pub fn join_words(parts: &[String]) -> String {
    parts.join(" ").trim().to_string()
}

pub fn format_conversation_lines(
    conversations: &[Conversation],
    active: Option<ConversationId>,
) -> Vec<String> {
    conversations
        .iter()
        .map(|conversation| {
            let marker = if Some(conversation.id) == active { "*" } else { " " };
            format!(
                "{marker} {:>6}  {}",
                conversation.id.get(),
                compact_text(&conversation.title)
            )
        })
        .collect()
}

pub fn conversation_to_item(conversation: &Conversation) -> ConversationListItem {
    ConversationListItem {
        id: conversation.id.get(),
        title: conversation.title.clone(),
    }
}

pub fn message_to_item(message: &Message) -> MessageItem {
    MessageItem {
        id: message.id,
        role: message.role.label().to_string(),
        content: message.content.clone(),
        timestamp: message.timestamp.to_rfc3339(),
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;

    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
