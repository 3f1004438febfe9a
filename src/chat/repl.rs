//! Glue between a [`ChatView`] and a terminal [`Renderer`].

use crate::chat::backend::{ChatBackend, ConversationMessage};
use crate::chat::events::ViewEvent;
use crate::chat::view::{ChatView, SendOutcome};
use crate::interrupt::Interrupt;
use crate::render::Renderer;

/// Prints every message of the view.
pub fn print_history<B, R>(view: &ChatView<B>, renderer: &mut R)
where
    B: ChatBackend,
    R: Renderer + ?Sized,
{
    for message in view.messages() {
        renderer.print_message(message.role(), message.content(), message.attachments());
    }
}

/// Shows queued notifications and navigation.
///
/// Returns true when the host's recent-chat list went stale.
pub fn drain_events<B, R>(view: &mut ChatView<B>, renderer: &mut R) -> bool
where
    B: ChatBackend,
    R: Renderer + ?Sized,
{
    let mut invalidated = false;
    for event in view.take_events() {
        match event {
            ViewEvent::Notify(notification) => renderer.print_notification(&notification),
            ViewEvent::Navigate(route) => {
                tracing::debug!(%route, "navigate");
                renderer.print_info(&format!("[{route}]"));
            }
            ViewEvent::InvalidateChats => invalidated = true,
        }
    }
    invalidated
}

/// Sends `line` and reveals the reply through `renderer`.
///
/// Ctrl+C during the cycle tears the view down; a bound conversation is then
/// reloaded so the reply is not lost.  Returns `None` when the view refused the
/// send.
pub async fn send_line<B, R>(
    view: &mut ChatView<B>,
    line: &str,
    renderer: &mut R,
    interrupt: &Interrupt,
) -> Option<SendOutcome>
where
    B: ChatBackend,
    R: Renderer + ?Sized,
{
    view.set_input(line);
    let bound = view.conversation_id().map(String::from);
    let pending = view.begin_send()?;
    interrupt.arm(view.cancel_token());

    let mut attachments = None;
    let outcome = view
        .complete_send(pending, |delta, message| {
            if attachments.is_none() {
                renderer.start_reply();
                attachments = Some(message.attachments.clone());
            }
            renderer.print_delta(delta);
        })
        .await;
    interrupt.disarm();

    match outcome {
        SendOutcome::Completed => {
            let attachments = attachments.unwrap_or_else(|| {
                view.messages()
                    .last()
                    .map(|message| message.attachments().to_vec())
                    .unwrap_or_default()
            });
            renderer.finish_reply(&attachments);
        }
        SendOutcome::Failed => {}
        SendOutcome::Discarded => {
            renderer.print_interrupted();
            if let Some(id) = bound {
                view.open(&id).await;
                print_history(view, renderer);
            }
        }
    }
    Some(outcome)
}
