//! In-memory collaborators for session tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Notify;

use crate::attachments::AttachmentPreview;
use crate::backend::{ChatBackend, ChatReply};
use crate::models::{AttachmentId, Conversation, ConversationId, Message, PendingSend, Role};
use crate::presenter::Presenter;
use crate::{ChatSession, Error, Result};

/// Backend operation a failure can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListConversations,
    ListMessages,
    Send,
    Create,
    Rename,
    Delete,
}

/// Canned failure returned by [`FakeBackend`].
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Status(u16, Option<String>),
    Backend(String),
}

impl From<FakeFailure> for Error {
    fn from(failure: FakeFailure) -> Self {
        match failure {
            FakeFailure::Status(status, detail) => Self::Status { status, detail },
            FakeFailure::Backend(message) => Self::Backend(message),
        }
    }
}

#[derive(Default)]
struct FakeState {
    conversations: Vec<Conversation>,
    messages: HashMap<ConversationId, Vec<Message>>,
    sent: Vec<PendingSend>,
    renames: Vec<(ConversationId, String)>,
    deletes: Vec<ConversationId>,
    next_id: i64,
    reply: String,
    failures: HashMap<Op, FakeFailure>,
}

/// A backend that keeps conversations in memory and records every call.
pub struct FakeBackend {
    state: Mutex<FakeState>,
    hold_sends: AtomicBool,
    send_started: Notify,
    send_released: Notify,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_id: 100,
                reply: "Hello from the assistant".to_string(),
                ..FakeState::default()
            }),
            hold_sends: AtomicBool::new(false),
            send_started: Notify::new(),
            send_released: Notify::new(),
        }
    }
}

impl FakeBackend {
    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Append a conversation to the listing (listing order is insertion order).
    pub fn with_conversation(self, id: i64, title: &str) -> Self {
        self.state().conversations.push(Conversation::new(id, title));
        self
    }

    /// Put a conversation at the top of the listing, as if created elsewhere.
    pub fn add_conversation(&self, id: i64, title: &str) {
        self.state()
            .conversations
            .insert(0, Conversation::new(id, title));
    }

    pub fn with_messages(self, id: i64, messages: Vec<Message>) -> Self {
        self.state()
            .messages
            .insert(ConversationId::new(id), messages);
        self
    }

    /// Id handed out to the next conversation the backend creates.
    pub fn with_next_id(self, id: i64) -> Self {
        self.state().next_id = id;
        self
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.state().reply = reply.to_string();
        self
    }

    pub fn failing(self, op: Op, failure: FakeFailure) -> Self {
        self.fail(op, failure);
        self
    }

    /// Make `op` fail from now on.
    pub fn fail(&self, op: Op, failure: FakeFailure) {
        self.state().failures.insert(op, failure);
    }

    /// Park every send until [`release_send`](Self::release_send).
    pub fn holding_sends(self) -> Self {
        self.hold_sends.store(true, Ordering::SeqCst);
        self
    }

    pub async fn wait_for_send(&self) {
        self.send_started.notified().await;
    }

    pub fn release_send(&self) {
        self.send_released.notify_one();
    }

    pub fn sent(&self) -> Vec<PendingSend> {
        self.state().sent.clone()
    }

    pub fn renames(&self) -> Vec<(ConversationId, String)> {
        self.state().renames.clone()
    }

    pub fn deletes(&self) -> Vec<ConversationId> {
        self.state().deletes.clone()
    }

    fn check(&self, op: Op) -> Result<()> {
        match self.state().failures.get(&op) {
            Some(failure) => Err(failure.clone().into()),
            None => Ok(()),
        }
    }

    fn allocate(&self, title: &str) -> Conversation {
        let mut state = self.state();
        let conversation = Conversation::new(state.next_id, title);
        state.next_id += 1;
        state.conversations.insert(0, conversation.clone());
        conversation
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.check(Op::ListConversations)?;
        Ok(self.state().conversations.clone())
    }

    async fn list_messages(&self, id: ConversationId) -> Result<Vec<Message>> {
        self.check(Op::ListMessages)?;
        Ok(self.state().messages.get(&id).cloned().unwrap_or_default())
    }

    async fn send_message(&self, pending: &PendingSend) -> Result<ChatReply> {
        self.state().sent.push(pending.clone());
        if self.hold_sends.load(Ordering::SeqCst) {
            self.send_started.notify_one();
            self.send_released.notified().await;
        }
        self.check(Op::Send)?;

        let conversation_id = match pending.conversation_id {
            Some(id) => id,
            None => self.allocate(&pending.text).id,
        };
        Ok(ChatReply {
            conversation_id,
            response: self.state().reply.clone(),
        })
    }

    async fn create_conversation(&self) -> Result<Conversation> {
        self.check(Op::Create)?;
        Ok(self.allocate("New Chat"))
    }

    async fn rename_conversation(&self, id: ConversationId, title: &str) -> Result<()> {
        self.check(Op::Rename)?;
        let mut state = self.state();
        state.renames.push((id, title.to_string()));
        if let Some(conversation) = state.conversations.iter_mut().find(|c| c.id == id) {
            conversation.title = title.to_string();
        }
        Ok(())
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<()> {
        self.check(Op::Delete)?;
        let mut state = self.state();
        state.deletes.push(id);
        state.conversations.retain(|c| c.id != id);
        state.messages.remove(&id);
        Ok(())
    }
}

/// Everything a [`RecordingPresenter`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message(Role, String),
    Error(String),
    ClearTranscript,
    Title(Option<String>),
    Confirm(String),
    ClearInput,
    Waiting(bool),
    Preview(AttachmentId, AttachmentPreview),
    RemovePreview(AttachmentId),
    ClearPreviews,
}

pub struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
    confirm_answer: AtomicBool,
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }
}

impl RecordingPresenter {
    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn answer_confirmations(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Messages currently on screen, replaying clears.
    pub fn transcript(&self) -> Vec<(Role, String)> {
        let mut transcript = Vec::new();
        for event in self.events() {
            match event {
                Event::Message(role, content) => transcript.push((role, content)),
                Event::ClearTranscript => transcript.clear(),
                _ => {}
            }
        }
        transcript
    }
}

impl Presenter for RecordingPresenter {
    fn show_message(&self, role: Role, content: &str) {
        self.record(Event::Message(role, content.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.record(Event::Error(message.to_string()));
    }

    fn clear_transcript(&self) {
        self.record(Event::ClearTranscript);
    }

    fn set_title(&self, title: Option<&str>) {
        self.record(Event::Title(title.map(str::to_string)));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.record(Event::Confirm(prompt.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn clear_input(&self) {
        self.record(Event::ClearInput);
    }

    fn set_waiting(&self, waiting: bool) {
        self.record(Event::Waiting(waiting));
    }

    fn show_attachment_preview(&self, id: AttachmentId, _name: &str, preview: &AttachmentPreview) {
        self.record(Event::Preview(id, preview.clone()));
    }

    fn remove_attachment_preview(&self, id: AttachmentId) {
        self.record(Event::RemovePreview(id));
    }

    fn clear_attachment_previews(&self) {
        self.record(Event::ClearPreviews);
    }
}

/// A session wired to `backend` and a fresh recording presenter.
pub fn session_with(
    backend: FakeBackend,
) -> (ChatSession, Arc<FakeBackend>, Arc<RecordingPresenter>) {
    let backend = Arc::new(backend);
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ChatSession::new(
        Arc::clone(&backend) as Arc<dyn ChatBackend>,
        Arc::clone(&presenter) as Arc<dyn Presenter>,
    );
    (session, backend, presenter)
}

/// A message whose content is `"message {id}"`, stamped with a SQLite-style
/// UTC timestamp.
pub fn message(id: i64, role: Role, timestamp: &str) -> Message {
    Message {
        id,
        role,
        content: format!("message {id}"),
        timestamp: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc(),
    }
}
