//! The public Minca customer chat in a terminal.
//!
//! No sign-in is needed.  The session id of the conversation is remembered
//! between runs; `/reset` or `--fresh` starts over.

use std::sync::Arc;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use minca::chat::{
    ChatCommand, ChatView, WidgetArgs, WidgetBackend, drain_events, parse_command, print_history,
    send_line, widget_help_text,
};
use minca::interrupt::Interrupt;
use minca::observability::{TracingLogger, init_tracing};
use minca::storage::FileStore;
use minca::{FileUpload, MincaClient, PlainTextRenderer, Renderer};

/// Main entry point for the minca-widget application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = WidgetArgs::parse();
    init_tracing();
    let config = args.common.client_config()?;

    let storage = Arc::new(FileStore::new(config.data_dir()));
    let client = MincaClient::new(&config)?.with_logger(Arc::new(TracingLogger));
    let backend = WidgetBackend::new(client, storage);
    if args.fresh {
        backend.forget_session()?;
    }
    let stored = match backend.stored_session() {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable widget session");
            None
        }
    };

    let mut renderer = PlainTextRenderer::with_color(!args.common.no_color);
    let mut rl = DefaultEditor::new()?;
    let interrupt = Interrupt::install()?;
    let mut view = ChatView::new(backend);

    renderer.print_info("Minca customer chat");
    renderer.print_info("Type /help for commands, /quit to exit\n");

    if let Some(id) = stored {
        view.open(&id).await;
    }
    print_history(&view, &mut renderer);
    drain_events(&mut view, &mut renderer);

    loop {
        match rl.readline("you> ") {
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
                            for line in widget_help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Reset => {
                            if let Err(err) = view.backend().forget_session() {
                                renderer.print_error(&err.to_string());
                            }
                            view.reset();
                            print_history(&view, &mut renderer);
                        }
                        ChatCommand::Attach(path) => match FileUpload::from_path(&path).await {
                            Ok(file) => {
                                let name = file.name.clone();
                                view.staging_mut().add(file);
                                renderer.print_info(&format!("Staged {name}"));
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
                        ChatCommand::Stats => renderer.print_stats(&view.stats()),
                        ChatCommand::Invalid(message) => renderer.print_error(&message),
                        _ => renderer.print_error("Not available in the customer chat; try /help"),
                    }
                    drain_events(&mut view, &mut renderer);
                    continue;
                }

                send_line(&mut view, line, &mut renderer, &interrupt).await;
                drain_events(&mut view, &mut renderer);
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
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
