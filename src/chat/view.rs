//! The chat view state machine.
//!
//! ```text
//!   Idle ──send──▶ Submitting ──ok──▶ Streaming ──revealed──▶ Ready
//!    │                 │                                        │
//!    └─open─▶ Loading  └──err──▶ Ready ◀────────────send────────┘
//! ```
//!
//! A send is split in two.  [`ChatView::begin_send`] runs synchronously: it
//! appends the optimistic user message, clears the input, takes the staged
//! files and marks the view as processing.  [`ChatView::complete_send`] awaits
//! the backend and reveals the reply.  While a send is processing every other
//! trigger is a no-op.
//!
//! Tearing the view down cancels its [`CancellationToken`].  Nothing is sent to
//! the backend; a reply that arrives afterwards is dropped, and a running
//! reveal stops at its next tick.

use std::time::Duration;

use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;

use crate::chat::backend::{ChatBackend, ConversationMessage, Draft, Reply};
use crate::chat::events::{Route, ViewEvent};
use crate::chat::staging::AttachmentStaging;
use crate::notification::Notification;
use crate::reveal::{IntervalTicker, REVEAL_TICK, Reveal, RevealController, RevealOutcome};
use crate::types::{Attachment, FileUpload};
use crate::utils::time::unix_millis;

/// Description of the notification raised when a send fails.
pub const SEND_FAILED: &str = "Failed to generate response. Please try again.";

/// Title of the notification raised when a conversation fails to load.
pub const LOAD_FAILED: &str = "Failed to load conversation";

/// Lifecycle state of a view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No conversation bound.
    Idle,
    /// Fetching a bound conversation's messages.
    Loading,
    /// Bound and waiting for input.
    Ready,
    /// Waiting for the backend's reply.
    Submitting,
    /// Revealing the reply.
    Streaming,
}

/// An assistant reply being revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingMessage {
    /// Client-only id, `stream-<millis>`.
    pub id: String,
    /// The revealed prefix.
    pub content: String,
    /// Attachments of the reply, shown from the first frame.
    pub attachments: Vec<Attachment>,
}

/// Counters kept per view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    /// Sends accepted by [`ChatView::begin_send`].
    pub sends: u64,
    /// Sends whose backend call failed.
    pub failures: u64,
    /// Reveal ticks across all replies.
    pub reveal_ticks: u64,
    /// Replies dropped because the view was torn down.
    pub discarded: u64,
}

/// A send accepted by [`ChatView::begin_send`].
#[derive(Debug)]
pub struct PendingSend {
    question: String,
    files: Vec<FileUpload>,
    conversation_id: Option<String>,
    cancel: CancellationToken,
}

impl PendingSend {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn files(&self) -> &[FileUpload] {
        &self.files
    }
}

/// How a send cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply was revealed and appended.
    Completed,
    /// The backend call failed; the optimistic message stays.
    Failed,
    /// The view was torn down before the cycle finished.
    Discarded,
}

/// A conversation as the user sees it.
pub struct ChatView<B: ChatBackend> {
    backend: B,
    conversation_id: Option<String>,
    state: ViewState,
    messages: Vec<B::Message>,
    streaming: Option<StreamingMessage>,
    processing: bool,
    staging: AttachmentStaging,
    input: String,
    tick: Duration,
    events: Vec<ViewEvent>,
    cancel: CancellationToken,
    stats: ViewStats,
}

impl<B: ChatBackend> ChatView<B> {
    /// Creates an unbound view.
    pub fn new(backend: B) -> Self {
        let staging = backend.staging();
        let mut view = Self {
            backend,
            conversation_id: None,
            state: ViewState::Idle,
            messages: Vec::new(),
            streaming: None,
            processing: false,
            staging,
            input: String::new(),
            tick: REVEAL_TICK,
            events: Vec::new(),
            cancel: CancellationToken::new(),
            stats: ViewStats::default(),
        };
        view.seed_welcome();
        view
    }

    /// Overrides the reveal period.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn messages(&self) -> &[B::Message] {
        &self.messages
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn staging(&self) -> &AttachmentStaging {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut AttachmentStaging {
        &mut self.staging
    }

    pub fn stats(&self) -> ViewStats {
        self.stats
    }

    /// The route this view currently shows.
    pub fn route(&self) -> Route {
        match &self.conversation_id {
            Some(id) => self.backend.conversation_route(id),
            None => self.backend.home_route(),
        }
    }

    /// A handle that tears this view down when cancelled.
    ///
    /// The handle is replaced whenever the view is reset or opened.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drains the side effects queued since the last call.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discards all local state and returns to an unbound view.
    pub fn reset(&mut self) {
        self.discard();
        self.seed_welcome();
    }

    /// Discards local state and loads conversation `id`.
    ///
    /// A load failure leaves an empty, bound view and queues a notification.
    pub async fn open(&mut self, id: &str) {
        self.discard();
        self.conversation_id = Some(id.to_string());
        self.state = ViewState::Loading;
        let cancel = self.cancel.clone();
        let loaded = self.backend.load(id).await;
        if cancel.is_cancelled() {
            self.reset();
            return;
        }
        match loaded {
            Ok(messages) => {
                tracing::debug!(conversation = id, count = messages.len(), "conversation loaded");
                self.messages = messages;
            }
            Err(err) => {
                tracing::warn!(conversation = id, error = %err, "conversation failed to load");
                self.notify(Notification::error(LOAD_FAILED).with_description(err.user_message()));
            }
        }
        self.state = ViewState::Ready;
    }

    /// Accepts the current input and staged files as a send.
    ///
    /// Returns `None`, changing nothing, while processing or when there is
    /// neither text nor a staged file.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        self.begin_send_at(OffsetDateTime::now_utc())
    }

    fn begin_send_at(&mut self, now: OffsetDateTime) -> Option<PendingSend> {
        let question = self.input.trim().to_string();
        if self.processing || matches!(self.state, ViewState::Loading) {
            return None;
        }
        if question.is_empty() && self.staging.is_empty() {
            return None;
        }

        let millis = unix_millis(now);
        let files = self.staging.take();
        let attachments = files
            .iter()
            .enumerate()
            .map(|(index, file)| Attachment {
                id: format!("temp-{index}-{millis}"),
                name: file.name.clone(),
                mime: file.mime.clone(),
                size: file.size(),
                kind: Attachment::kind_for_mime(&file.mime),
            })
            .collect();
        let id = format!("temp-{millis}");
        let message = self.backend.draft(Draft {
            id: &id,
            conversation_id: self.conversation_id.as_deref(),
            content: &question,
            attachments,
            now,
        });
        self.messages.push(message);
        self.input.clear();
        self.processing = true;
        self.state = ViewState::Submitting;
        self.stats.sends += 1;
        tracing::debug!(
            conversation = ?self.conversation_id,
            files = files.len(),
            "send accepted"
        );

        Some(PendingSend {
            question,
            files,
            conversation_id: self.conversation_id.clone(),
            cancel: self.cancel.clone(),
        })
    }

    /// Awaits the reply to `pending` and reveals it.
    ///
    /// `on_frame` sees each newly revealed character and the reply as revealed
    /// so far, attachments included.
    pub async fn complete_send<F>(&mut self, pending: PendingSend, on_frame: F) -> SendOutcome
    where
        F: FnMut(char, &StreamingMessage) + Send,
    {
        let PendingSend {
            question,
            files,
            conversation_id,
            cancel,
        } = pending;

        let reply = match &conversation_id {
            Some(id) => self.backend.append(id, &question, &files).await,
            None => self.backend.start(&question, &files).await,
        };
        if cancel.is_cancelled() {
            return self.dropped();
        }

        let Reply {
            conversation_id: reply_id,
            assistant,
        } = match reply {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "send failed");
                self.stats.failures += 1;
                self.processing = false;
                self.state = ViewState::Ready;
                self.notify(Notification::error("Error").with_description(SEND_FAILED));
                return SendOutcome::Failed;
            }
        };

        self.state = ViewState::Streaming;
        self.streaming = Some(StreamingMessage {
            id: format!("stream-{}", unix_millis(OffsetDateTime::now_utc())),
            content: String::new(),
            attachments: assistant.attachments().to_vec(),
        });

        let mut reveal = Reveal::new(assistant.content());
        let mut controller = RevealController::new(IntervalTicker::new(self.tick), cancel);
        let streaming = &mut self.streaming;
        let mut on_frame = on_frame;
        let outcome = controller
            .run(&mut reveal, |delta, _| {
                if let Some(message) = streaming.as_mut() {
                    message.content.push(delta);
                    on_frame(delta, message);
                }
            })
            .await;
        self.stats.reveal_ticks += outcome.ticks() as u64;
        if let RevealOutcome::Cancelled { .. } = outcome {
            return self.dropped();
        }

        self.streaming = None;
        self.messages.push(assistant);
        self.processing = false;
        self.state = ViewState::Ready;

        if conversation_id.is_none() {
            self.conversation_id = Some(reply_id.clone());
            match self.backend.created(&reply_id) {
                Ok(events) => self.events.extend(events),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to record new conversation");
                    self.events
                        .push(ViewEvent::Navigate(self.backend.conversation_route(&reply_id)));
                }
            }
        }
        SendOutcome::Completed
    }

    /// [`begin_send`](Self::begin_send) followed by
    /// [`complete_send`](Self::complete_send).
    pub async fn send<F>(&mut self, on_frame: F) -> Option<SendOutcome>
    where
        F: FnMut(char, &StreamingMessage) + Send,
    {
        let pending = self.begin_send()?;
        Some(self.complete_send(pending, on_frame).await)
    }

    fn dropped(&mut self) -> SendOutcome {
        tracing::debug!("reply dropped after teardown");
        self.stats.discarded += 1;
        self.reset();
        SendOutcome::Discarded
    }

    fn discard(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.conversation_id = None;
        self.state = ViewState::Idle;
        self.messages.clear();
        self.streaming = None;
        self.processing = false;
        self.staging.clear();
        self.input.clear();
    }

    fn seed_welcome(&mut self) {
        if let Some(welcome) = self.backend.welcome(OffsetDateTime::now_utc()) {
            self.messages.push(welcome);
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(ViewEvent::Notify(notification));
    }
}

impl<B: ChatBackend + std::fmt::Debug> std::fmt::Debug for ChatView<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatView")
            .field("backend", &self.backend)
            .field("conversation_id", &self.conversation_id)
            .field("state", &self.state)
            .field("messages", &self.messages.len())
            .field("processing", &self.processing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::staging::AttachmentStaging;
    use crate::error::{Error, Result};
    use crate::types::{CustomerMessage, MessageRole};
    use std::sync::Mutex;
    use time::macros::datetime;

    /// Records calls and replays canned replies.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<String>>,
        reply: Mutex<Option<Result<Reply<CustomerMessage>>>>,
        history: Vec<CustomerMessage>,
        fail_load: bool,
        greets: bool,
        cancel_during_call: Mutex<Option<CancellationToken>>,
    }

    impl FakeBackend {
        fn replying(session: &str, content: &str) -> Self {
            let backend = Self::default();
            *backend.reply.lock().unwrap() = Some(Ok(Reply {
                conversation_id: session.to_string(),
                assistant: message("srv-a", session, MessageRole::Assistant, content),
            }));
            backend
        }

        fn failing() -> Self {
            let backend = Self::default();
            *backend.reply.lock().unwrap() =
                Some(Err(Error::from_status(500, None, "/customer-chat/init")));
            backend
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self, call: String) -> Result<Reply<CustomerMessage>> {
            self.calls.lock().unwrap().push(call);
            if let Some(cancel) = self.cancel_during_call.lock().unwrap().as_ref() {
                cancel.cancel();
            }
            self.reply
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err(Error::api(599, "no reply")))
        }
    }

    fn message(id: &str, session: &str, role: MessageRole, content: &str) -> CustomerMessage {
        CustomerMessage {
            id: id.to_string(),
            session_id: session.to_string(),
            role,
            content: content.to_string(),
            created_at: datetime!(2025-03-01 10:00 UTC),
        }
    }

    #[async_trait::async_trait]
    impl ChatBackend for FakeBackend {
        type Message = CustomerMessage;

        fn home_route(&self) -> Route {
            Route::Widget
        }

        fn conversation_route(&self, id: &str) -> Route {
            Route::WidgetSession(id.to_string())
        }

        fn welcome(&self, _: OffsetDateTime) -> Option<CustomerMessage> {
            self.greets
                .then(|| message("welcome", "", MessageRole::Assistant, "Hi!"))
        }

        fn staging(&self) -> AttachmentStaging {
            AttachmentStaging::new()
        }

        fn draft(&self, draft: Draft<'_>) -> CustomerMessage {
            message(
                draft.id,
                draft.conversation_id.unwrap_or_default(),
                MessageRole::User,
                draft.content,
            )
        }

        async fn load(&self, id: &str) -> Result<Vec<CustomerMessage>> {
            self.calls.lock().unwrap().push(format!("load {id}"));
            if self.fail_load {
                Err(Error::from_status(404, Some("Chat not found".into()), "/x"))
            } else {
                Ok(self.history.clone())
            }
        }

        async fn start(
            &self,
            question: &str,
            files: &[FileUpload],
        ) -> Result<Reply<CustomerMessage>> {
            self.respond(format!("start {question} files={}", files.len()))
        }

        async fn append(
            &self,
            id: &str,
            question: &str,
            files: &[FileUpload],
        ) -> Result<Reply<CustomerMessage>> {
            self.respond(format!("append {id} {question} files={}", files.len()))
        }

        fn created(&self, id: &str) -> Result<Vec<ViewEvent>> {
            self.calls.lock().unwrap().push(format!("created {id}"));
            Ok(vec![ViewEvent::Navigate(Route::WidgetSession(id.to_string()))])
        }
    }

    #[test]
    fn begin_send_appends_optimistic_message() {
        let mut view = ChatView::new(FakeBackend::replying("s-1", "ok"));
        view.set_input("  What does my policy cover?  ");
        let pending = view.begin_send().unwrap();
        assert_eq!(pending.question(), "What does my policy cover?");
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.messages()[0].content, "What does my policy cover?");
        assert!(view.messages()[0].id.starts_with("temp-"));
        assert_eq!(view.input(), "");
        assert!(view.is_processing());
        assert_eq!(view.state(), ViewState::Submitting);
    }

    #[test]
    fn send_is_noop_while_processing() {
        let mut view = ChatView::new(FakeBackend::replying("s-1", "ok"));
        view.set_input("first");
        assert!(view.begin_send().is_some());
        for _ in 0..5 {
            view.set_input("again");
            assert!(view.begin_send().is_none());
        }
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.stats().sends, 1);
    }

    #[test]
    fn empty_input_without_files_is_rejected() {
        let mut view = ChatView::new(FakeBackend::replying("s-1", "ok"));
        view.set_input("   ");
        assert!(view.begin_send().is_none());
        assert!(view.messages().is_empty());

        view.staging_mut()
            .add(FileUpload::new("claim.pdf", b"%PDF".to_vec()));
        let pending = view.begin_send().unwrap();
        assert_eq!(pending.files().len(), 1);
        assert!(view.staging().is_empty());
    }

    #[test]
    fn provisional_attachment_ids() {
        let backend = crate::chat::backend::AssistantBackend::new(
            crate::client::MincaClient::new(&crate::config::ClientConfig::new()).unwrap(),
            crate::types::ChatType::Policy,
        );
        let mut view = ChatView::new(backend);
        view.staging_mut()
            .add(FileUpload::new("a.pdf", b"1".to_vec()));
        view.staging_mut()
            .add(FileUpload::new("b.doc", b"22".to_vec()));
        view.set_input("see attached");
        let now = datetime!(2025-03-01 10:00 UTC);
        view.begin_send_at(now).unwrap();
        let millis = unix_millis(now);
        let attachments = view.messages()[0].attachments();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].id, format!("temp-0-{millis}"));
        assert_eq!(attachments[1].id, format!("temp-1-{millis}"));
        assert_eq!(attachments[1].size, 2);
        assert_eq!(attachments[0].kind, "application");
        assert_eq!(view.messages()[0].id, format!("temp-{millis}"));
    }

    #[tokio::test(start_paused = true)]
    async fn new_conversation_reveals_then_navigates_once() {
        let started = tokio::time::Instant::now();
        let mut view = ChatView::new(FakeBackend::replying("s-42", "Covered."));
        view.set_input("What does my policy cover?");
        let mut frames = Vec::new();
        let outcome = view
            .send(|_, message| frames.push(message.content.clone()))
            .await;
        assert_eq!(outcome, Some(SendOutcome::Completed));
        assert_eq!(started.elapsed(), REVEAL_TICK * 8);
        assert_eq!(frames.len(), 8);
        assert_eq!(frames.last().map(String::as_str), Some("Covered."));

        assert_eq!(view.messages().len(), 2);
        assert_eq!(view.messages()[1].id, "srv-a");
        assert_eq!(view.messages()[1].content, "Covered.");
        assert!(view.streaming.is_none());
        assert!(!view.is_processing());
        assert_eq!(view.state(), ViewState::Ready);
        assert_eq!(view.conversation_id(), Some("s-42"));
        assert_eq!(
            view.backend().calls(),
            vec![
                "start What does my policy cover? files=0".to_string(),
                "created s-42".to_string()
            ]
        );
        assert_eq!(
            view.take_events(),
            vec![ViewEvent::Navigate(Route::WidgetSession("s-42".into()))]
        );
        assert!(view.take_events().is_empty());
        assert_eq!(view.stats().reveal_ticks, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn bound_conversation_appends_without_navigation() {
        let mut view = ChatView::new(FakeBackend::replying("s-1", "Yes."));
        view.open("s-1").await;
        view.set_input("And theft?");
        view.send(|_, _| {}).await;
        view.set_input("And fire?");
        view.send(|_, _| {}).await;
        assert_eq!(view.messages().len(), 4);
        assert_eq!(
            view.backend().calls(),
            vec![
                "load s-1".to_string(),
                "append s-1 And theft? files=0".to_string(),
                "append s-1 And fire? files=0".to_string(),
            ]
        );
        assert!(view.take_events().is_empty());
        assert_eq!(view.route(), Route::WidgetSession("s-1".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_optimistic_message() {
        let mut view = ChatView::new(FakeBackend::failing());
        view.set_input("hello");
        let outcome = view.send(|_, _| panic!("no frames on failure")).await;
        assert_eq!(outcome, Some(SendOutcome::Failed));
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.messages()[0].role, MessageRole::User);
        assert!(!view.is_processing());
        assert_eq!(view.state(), ViewState::Ready);
        let events = view.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ViewEvent::Notify(n) => {
                assert!(n.is_error());
                assert_eq!(n.description.as_deref(), Some(SEND_FAILED));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(view.backend().calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_after_teardown_is_ignored() {
        let mut view = ChatView::new(FakeBackend::replying("s-1", "late"));
        *view.backend.cancel_during_call.lock().unwrap() = Some(view.cancel_token());
        view.set_input("hello");
        let outcome = view.send(|_, _| panic!("no frames after teardown")).await;
        assert_eq!(outcome, Some(SendOutcome::Discarded));
        assert!(view.messages().is_empty());
        assert_eq!(view.state(), ViewState::Idle);
        assert!(view.take_events().is_empty());
        assert_eq!(view.stats().discarded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_restores_welcome() {
        let backend = FakeBackend {
            greets: true,
            ..FakeBackend::replying("s-1", "late")
        };
        let mut view = ChatView::new(backend);
        *view.backend.cancel_during_call.lock().unwrap() = Some(view.cancel_token());
        view.set_input("hello");
        assert_eq!(view.messages().len(), 1);
        let outcome = view.send(|_, _| {}).await;
        assert_eq!(outcome, Some(SendOutcome::Discarded));
        assert_eq!(view.state(), ViewState::Idle);
        let contents: Vec<_> = view.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["Hi!"]);
        assert_eq!(view.route(), Route::Widget);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_stops_reveal() {
        let mut view = ChatView::new(FakeBackend::replying("s-1", "a fairly long reply"));
        let cancel = view.cancel_token();
        tokio::spawn(async move {
            tokio::time::sleep(REVEAL_TICK * 4 + Duration::from_millis(5)).await;
            cancel.cancel();
        });
        view.set_input("hello");
        let mut frames = 0;
        let outcome = view.send(|_, _| frames += 1).await;
        assert_eq!(outcome, Some(SendOutcome::Discarded));
        assert_eq!(frames, 4);
        assert!(view.streaming.is_none());
        assert!(view.messages().is_empty());
        assert!(!view.is_processing());
    }

    #[tokio::test]
    async fn load_failure_leaves_empty_ready_view() {
        let backend = FakeBackend {
            fail_load: true,
            ..FakeBackend::default()
        };
        let mut view = ChatView::new(backend);
        view.open("missing").await;
        assert_eq!(view.state(), ViewState::Ready);
        assert!(view.messages().is_empty());
        assert_eq!(view.conversation_id(), Some("missing"));
        let events = view.take_events();
        assert!(matches!(&events[..], [ViewEvent::Notify(n)] if n.title == LOAD_FAILED));
    }

    #[tokio::test]
    async fn open_replaces_previous_state() {
        let backend = FakeBackend {
            history: vec![message("m-1", "s-2", MessageRole::User, "hi")],
            ..FakeBackend::replying("s-1", "ok")
        };
        let mut view = ChatView::new(backend);
        view.set_input("draft text");
        view.staging_mut()
            .add(FileUpload::new("a.pdf", b"1".to_vec()));
        let before = view.cancel_token();
        view.open("s-2").await;
        assert!(before.is_cancelled());
        assert!(!view.cancel_token().is_cancelled());
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.input(), "");
        assert!(view.staging().is_empty());
    }
}
