//! Terminal rendering for the chat and knowledge-base front-ends.
//!
//! This module provides the renderer trait and a plain-text implementation
//! with optional ANSI styling.

use std::io::{self, Stdout, Write};

use time::OffsetDateTime;

use crate::chat::{AttachmentStaging, ViewStats};
use crate::conversations::is_ai_responding;
use crate::knowledge_base::{CollectionEntry, StagedUpload, UploadStatus, format_file_size};
use crate::notification::{Notification, NotificationKind};
use crate::types::{Attachment, Chat, ConversationSummary, MessageRole};

/// ANSI escape code for dim text (used for metadata).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for speaker labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the assistant).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for staged files).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for success).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for magenta text (used for attachments).
const ANSI_MAGENTA: &str = "\x1b[35m";

const PROGRESS_WIDTH: usize = 20;

/// Trait for rendering front-end output.
///
/// Views never print; front-ends feed what they produce through a renderer.
pub trait Renderer: Send {
    /// Print a complete message with its attachments.
    fn print_message(&mut self, role: MessageRole, content: &str, attachments: &[Attachment]);

    /// Called before the first revealed character of a reply.
    fn start_reply(&mut self);

    /// Print one revealed character.
    fn print_delta(&mut self, delta: char);

    /// Called when a reveal completes; lists the reply's attachments.
    fn finish_reply(&mut self, attachments: &[Attachment]);

    /// Print a notification raised by a view or an operation.
    fn print_notification(&mut self, notification: &Notification);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print the files staged for the next message.
    fn print_staged(&mut self, staging: &AttachmentStaging);

    /// Print the simulated progress of staged uploads.
    fn print_uploads(&mut self, uploads: &[StagedUpload]);

    /// Print a page of recent chats.
    fn print_chats(&mut self, chats: &[Chat], has_more: bool);

    /// Print customer conversation summaries.
    fn print_conversations(&mut self, conversations: &[&ConversationSummary], now: OffsetDateTime);

    /// Print the knowledge-base collections.
    fn print_collections(&mut self, collections: &[CollectionEntry]);

    /// Print view counters.
    fn print_stats(&mut self, stats: &ViewStats);

    /// Called when a reveal is interrupted by the user.
    fn print_interrupted(&mut self) {}
}

/// Plain text renderer with optional ANSI styling.
///
/// Output goes to stdout unless another writer is supplied; errors go to the
/// same writer so that tests can capture everything.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    in_reply: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Renders into `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            in_reply: false,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, code: &'static str) -> &'static str {
        if self.use_color { code } else { "" }
    }

    fn reset(&self) -> &'static str {
        self.style(ANSI_RESET)
    }

    fn write(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }

    fn line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    fn end_reply(&mut self) {
        if self.in_reply {
            self.write("\n");
            self.in_reply = false;
        }
    }

    fn label(&self, role: MessageRole) -> String {
        match role {
            MessageRole::User => format!("{}you>{} ", self.style(ANSI_BOLD), self.reset()),
            MessageRole::Assistant => format!(
                "{}{}minca>{} ",
                self.style(ANSI_BOLD),
                self.style(ANSI_CYAN),
                self.reset()
            ),
        }
    }

    fn print_attachments(&mut self, attachments: &[Attachment]) {
        for attachment in attachments {
            let text = format!(
                "  {}[{}] {} ({}){}",
                self.style(ANSI_MAGENTA),
                attachment.kind,
                attachment.name,
                format_file_size(attachment.size),
                self.reset()
            );
            self.line(&text);
        }
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_message(&mut self, role: MessageRole, content: &str, attachments: &[Attachment]) {
        self.end_reply();
        let label = self.label(role);
        self.write(&label);
        self.line(content);
        self.print_attachments(attachments);
    }

    fn start_reply(&mut self) {
        self.end_reply();
        let label = self.label(MessageRole::Assistant);
        self.write(&label);
        self.in_reply = true;
    }

    fn print_delta(&mut self, delta: char) {
        let mut buf = [0u8; 4];
        self.write(delta.encode_utf8(&mut buf));
    }

    fn finish_reply(&mut self, attachments: &[Attachment]) {
        self.end_reply();
        self.print_attachments(attachments);
    }

    fn print_notification(&mut self, notification: &Notification) {
        self.end_reply();
        let color = match notification.kind {
            NotificationKind::Success => ANSI_GREEN,
            NotificationKind::Error => ANSI_RED,
        };
        let text = format!("{}{notification}{}", self.style(color), self.reset());
        self.line(&text);
    }

    fn print_error(&mut self, error: &str) {
        self.end_reply();
        let text = format!("{}Error: {error}{}", self.style(ANSI_RED), self.reset());
        self.line(&text);
    }

    fn print_info(&mut self, info: &str) {
        self.end_reply();
        self.line(info);
    }

    fn print_staged(&mut self, staging: &AttachmentStaging) {
        if staging.is_empty() {
            self.line("No files staged.");
            return;
        }
        for (index, (_, file)) in staging.iter().enumerate() {
            let text = format!(
                "{}{:>2}. {} ({}){}",
                self.style(ANSI_YELLOW),
                index + 1,
                file.name,
                format_file_size(file.size()),
                self.reset()
            );
            self.line(&text);
        }
    }

    fn print_uploads(&mut self, uploads: &[StagedUpload]) {
        for upload in uploads {
            let filled = usize::from(upload.progress) * PROGRESS_WIDTH / 100;
            let color = match upload.status {
                UploadStatus::Success => ANSI_GREEN,
                UploadStatus::Error => ANSI_RED,
                UploadStatus::Uploading | UploadStatus::Processing => ANSI_YELLOW,
            };
            let text = format!(
                "{}[{}{}] {:>3}% {:<10}{} {} ({})",
                self.style(color),
                "#".repeat(filled),
                " ".repeat(PROGRESS_WIDTH - filled),
                upload.progress,
                upload.status.as_str(),
                self.reset(),
                upload.file.name,
                format_file_size(upload.file.size()),
            );
            self.line(&text);
        }
    }

    fn print_chats(&mut self, chats: &[Chat], has_more: bool) {
        if chats.is_empty() {
            self.line("No chats yet.");
            return;
        }
        for chat in chats {
            let text = format!(
                "{}  {}{}[{}]{}",
                chat.display_title(),
                self.style(ANSI_DIM),
                chat.id,
                chat.chat_type.as_str(),
                self.reset()
            );
            self.line(&text);
        }
        if has_more {
            self.line("(/chats more for older chats)");
        }
    }

    fn print_conversations(&mut self, conversations: &[&ConversationSummary], now: OffsetDateTime) {
        if conversations.is_empty() {
            self.line("No conversations match.");
            return;
        }
        for summary in conversations {
            let (status, color) = if is_ai_responding(summary, now) {
                ("ai-responding", ANSI_GREEN)
            } else {
                ("closed", ANSI_DIM)
            };
            let text = format!(
                "{}  {}{status}{}  {} messages  {}",
                summary.session_id,
                self.style(color),
                self.reset(),
                summary.total_messages,
                summary.last_message.as_deref().unwrap_or("")
            );
            self.line(&text);
        }
    }

    fn print_collections(&mut self, collections: &[CollectionEntry]) {
        if collections.is_empty() {
            self.line("No collections.");
            return;
        }
        for entry in collections {
            let marker = if entry.expanded { "v" } else { ">" };
            let text = format!(
                "{marker} {}{}{} ({} files)",
                self.style(ANSI_BOLD),
                entry.collection.collection,
                self.reset(),
                entry.collection.files.len()
            );
            self.line(&text);
            if !entry.expanded {
                continue;
            }
            for file in &entry.collection.files {
                self.line(&format!("    {}", file.filename));
            }
        }
    }

    fn print_stats(&mut self, stats: &ViewStats) {
        self.line(&format!("Sends:        {}", stats.sends));
        self.line(&format!("Failures:     {}", stats.failures));
        self.line(&format!("Reveal ticks: {}", stats.reveal_ticks));
        self.line(&format!("Discarded:    {}", stats.discarded));
    }

    fn print_interrupted(&mut self) {
        self.end_reply();
        self.line("[interrupted]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Collection, FileUpload, KnowledgeBaseFile};

    fn render(f: impl FnOnce(&mut PlainTextRenderer<Vec<u8>>)) -> String {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        f(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn reveal_frames_share_a_line() {
        let out = render(|r| {
            r.start_reply();
            for c in "Yes.".chars() {
                r.print_delta(c);
            }
            r.finish_reply(&[]);
            r.print_info("done");
        });
        assert_eq!(out, "minca> Yes.\ndone\n");
    }

    #[test]
    fn messages_list_attachments() {
        let attachment = Attachment {
            id: "a-1".into(),
            name: "policy.pdf".into(),
            mime: "application/pdf".into(),
            size: 2048,
            kind: "application".into(),
        };
        let out = render(|r| r.print_message(MessageRole::User, "see attached", &[attachment]));
        assert_eq!(out, "you> see attached\n  [application] policy.pdf (2.0 KB)\n");
    }

    #[test]
    fn notifications_without_color() {
        let out = render(|r| {
            r.print_notification(&Notification::error("Error").with_description("boom"))
        });
        assert_eq!(out, "Error: boom\n");
    }

    #[test]
    fn failed_uploads_show_error() {
        let mut queue = crate::knowledge_base::UploadQueue::new();
        queue.stage("Home", vec![FileUpload::new("a.pdf", vec![0u8; 512])]).unwrap();
        queue.mark_failed();
        let out = render(|r| r.print_uploads(queue.uploads()));
        assert_eq!(out, format!("[{}]   0% error      a.pdf (512 bytes)\n", " ".repeat(PROGRESS_WIDTH)));
    }

    #[test]
    fn collapsed_collections_hide_files() {
        let collection = Collection {
            collection: "Home".into(),
            files: vec![KnowledgeBaseFile {
                filename: "a.pdf".into(),
                last_modified: None,
            }],
        };
        let out = render(|r| {
            r.print_collections(&[
                CollectionEntry {
                    collection: collection.clone(),
                    expanded: true,
                },
                CollectionEntry {
                    collection,
                    expanded: false,
                },
            ])
        });
        assert_eq!(out, "v Home (1 files)\n    a.pdf\n> Home (1 files)\n");
    }

    #[test]
    fn staged_files_are_numbered() {
        let mut staging = AttachmentStaging::new();
        staging.add(FileUpload::new("a.pdf", vec![0u8; 10]));
        let out = render(|r| r.print_staged(&staging));
        assert_eq!(out, " 1. a.pdf (10 bytes)\n");
    }
}
