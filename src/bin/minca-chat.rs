//! Interactive chat with the Minca policy and sales assistants.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and talk to the policy assistant
//! minca-chat --email agent@example.com
//!
//! # Talk to the sales assistant against another backend
//! minca-chat --assistant sales --base-url https://api.minca.example
//!
//! # Reopen a chat
//! minca-chat --open 4f2a
//! ```
//!
//! # Commands
//!
//! While chatting, `/help` lists the slash commands.  Anything else is sent
//! to the assistant.

use std::sync::Arc;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use time::OffsetDateTime;

use minca::chat::{
    AssistantBackend, ChatArgs, ChatCommand, ChatConfig, ChatView, RecentChats, drain_events,
    help_text, parse_command, print_history, send_line,
};
use minca::conversations::ConversationReview;
use minca::interrupt::Interrupt;
use minca::observability::{TracingLogger, init_tracing};
use minca::storage::FileStore;
use minca::{FileUpload, MincaClient, PlainTextRenderer, Renderer, SessionStore};

/// Main entry point for the minca-chat application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ChatArgs::parse();
    init_tracing();
    let config = ChatConfig::from_args(&args)?;

    let storage = Arc::new(FileStore::new(config.client.data_dir()));
    let session = Arc::new(SessionStore::hydrate(storage));
    let client = MincaClient::new(&config.client)?
        .with_session(Arc::clone(&session))
        .with_logger(Arc::new(TracingLogger));
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;
    let interrupt = Interrupt::install()?;

    if !session.is_authenticated() && !sign_in(&args, &session, &client, &mut rl, &mut renderer).await {
        return Ok(());
    }
    if let Some(user) = session.user() {
        renderer.print_info(&format!("Signed in as {} <{}>", user.username, user.email));
    }

    let mut view = ChatView::new(AssistantBackend::new(client.clone(), config.chat_type));
    let mut recent = RecentChats::new();
    let mut review = ConversationReview::new();

    renderer.print_info(&format!("Minca {}", config.chat_type.display_name()));
    renderer.print_info("Type /help for commands, /quit to exit\n");

    if let Some(id) = &args.open {
        view.open(id).await;
        print_history(&view, &mut renderer);
        drain_events(&mut view, &mut renderer);
    }

    loop {
        let readline = rl.readline("you> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::New => {
                            view.reset();
                            renderer.print_info(&format!("[{}]", view.route()));
                        }
                        ChatCommand::Open(id) => {
                            view.open(&id).await;
                            print_history(&view, &mut renderer);
                        }
                        ChatCommand::Chats { more } => {
                            if more {
                                recent.load_more();
                            }
                            match recent.visible(&client).await {
                                Ok(chats) => {
                                    let chats = chats.to_vec();
                                    renderer.print_chats(&chats, recent.has_more());
                                }
                                Err(err) => renderer.print_error(err.user_message()),
                            }
                        }
                        ChatCommand::Attach(path) => match FileUpload::from_path(&path).await {
                            Ok(file) => {
                                let name = file.name.clone();
                                if view.staging_mut().add(file).is_some() {
                                    renderer.print_info(&format!("Staged {name}"));
                                } else {
                                    renderer.print_error("Only .pdf, .doc and .docx files can be attached");
                                }
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Detach(n) => {
                            let removed = view
                                .staging()
                                .id_at(n - 1)
                                .and_then(|id| view.staging_mut().remove(id));
                            match removed {
                                Some(file) => renderer.print_info(&format!("Unstaged {}", file.name)),
                                None => renderer.print_error(&format!("No staged file {n}")),
                            }
                        }
                        ChatCommand::Files => renderer.print_staged(view.staging()),
                        ChatCommand::Customers { status, query } => {
                            match review.refresh(&client).await {
                                Ok(()) => {
                                    let now = OffsetDateTime::now_utc();
                                    let rows =
                                        review.filtered(query.as_deref().unwrap_or(""), status, now);
                                    renderer.print_conversations(&rows, now);
                                }
                                Err(err) => renderer.print_error(err.user_message()),
                            }
                        }
                        ChatCommand::Customer(session_id) => {
                            match review.select(&client, &session_id).await {
                                Ok(()) => {
                                    for message in review.messages() {
                                        renderer.print_message(message.role, &message.content, &[]);
                                    }
                                }
                                Err(err) => renderer.print_error(err.user_message()),
                            }
                        }
                        ChatCommand::CrmConnect => match client.hubspot_authorize().await {
                            Ok(value) => print_json(&mut renderer, &value),
                            Err(err) => renderer.print_error(err.user_message()),
                        },
                        ChatCommand::CrmCallback(code) => {
                            match client.hubspot_callback(&code).await {
                                Ok(value) => print_json(&mut renderer, &value),
                                Err(err) => renderer.print_error(err.user_message()),
                            }
                        }
                        ChatCommand::CrmToken => match client.hubspot_access_token().await {
                            Ok(token) => renderer.print_info(&token.hubspot_access_token),
                            Err(err) => renderer.print_error(err.user_message()),
                        },
                        ChatCommand::Stats => renderer.print_stats(&view.stats()),
                        ChatCommand::Logout => {
                            if let Err(err) = session.logout() {
                                renderer.print_error(&err.to_string());
                            }
                            renderer.print_info("Signed out.");
                            break;
                        }
                        ChatCommand::Reset => {
                            renderer.print_error("/reset is only available in minca-widget");
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    if drain_events(&mut view, &mut renderer) {
                        recent.invalidate();
                    }
                    continue;
                }

                send_line(&mut view, line, &mut renderer, &interrupt).await;
                if drain_events(&mut view, &mut renderer) {
                    recent.invalidate();
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Prompts for credentials and signs in or registers.
async fn sign_in(
    args: &ChatArgs,
    session: &SessionStore,
    client: &MincaClient,
    rl: &mut DefaultEditor,
    renderer: &mut PlainTextRenderer,
) -> bool {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => match rl.readline("email: ") {
            Ok(email) => email.trim().to_string(),
            Err(_) => return false,
        },
    };
    let password = match rl.readline("password: ") {
        Ok(password) => password,
        Err(_) => return false,
    };
    let outcome = match &args.register {
        Some(username) => session.register(client, username, &email, &password).await,
        None => session.login(client, &email, &password).await,
    };
    match outcome {
        Ok(_) => true,
        Err(err) => {
            renderer.print_error(err.user_message());
            false
        }
    }
}

fn print_json(renderer: &mut PlainTextRenderer, value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => renderer.print_info(&text),
        Err(err) => renderer.print_error(&err.to_string()),
    }
}
