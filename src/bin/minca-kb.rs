//! Manage the Minca knowledge base.
//!
//! Uses the session stored by `minca-chat`; sign in there first.
//!
//! ```bash
//! minca-kb list
//! minca-kb list --collapse "Home policies"
//! minca-kb upload --collection "Home policies" terms.pdf riders.pdf
//! minca-kb delete --collection "Home policies" terms.pdf
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use minca::chat::CommonArgs;
use minca::interrupt::Interrupt;
use minca::knowledge_base::{KnowledgeBase, UploadQueue};
use minca::observability::{TracingLogger, init_tracing};
use minca::storage::FileStore;
use minca::{FileUpload, MincaClient, PlainTextRenderer, Renderer, SessionStore};

/// Command-line arguments for minca-kb.
#[derive(Parser, Debug)]
#[command(name = "minca-kb", about = "Manage the Minca knowledge base")]
struct KbArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: KbCommand,
}

#[derive(Subcommand, Debug)]
enum KbCommand {
    /// List collections and their files.
    List {
        /// Hide the files of this collection; repeatable.
        #[arg(long, value_name = "NAME")]
        collapse: Vec<String>,
    },
    /// Upload PDF files (10 MB or less) into a collection.
    Upload {
        #[arg(long, value_name = "NAME")]
        collection: String,

        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Delete a file from a collection.
    Delete {
        #[arg(long, value_name = "NAME")]
        collection: String,

        #[arg(value_name = "FILENAME")]
        filename: String,
    },
}

/// Main entry point for the minca-kb application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = KbArgs::parse();
    init_tracing();
    let config = args.common.client_config()?;

    let storage = Arc::new(FileStore::new(config.data_dir()));
    let session = Arc::new(SessionStore::hydrate(storage));
    let mut renderer = PlainTextRenderer::with_color(!args.common.no_color);
    if !session.is_authenticated() {
        renderer.print_error("Not signed in; sign in with minca-chat first");
        return Ok(ExitCode::FAILURE);
    }
    let client = MincaClient::new(&config)?
        .with_session(session)
        .with_logger(Arc::new(TracingLogger));
    let mut kb = KnowledgeBase::new();

    let ok = match args.command {
        KbCommand::List { collapse } => list(&client, &mut kb, &collapse, &mut renderer).await,
        KbCommand::Upload { collection, files } => {
            upload(&client, &mut kb, &collection, &files, &mut renderer).await?
        }
        KbCommand::Delete {
            collection,
            filename,
        } => {
            let notification = kb.delete_file(&client, &filename, &collection).await;
            renderer.print_notification(&notification);
            !notification.is_error()
        }
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn list(
    client: &MincaClient,
    kb: &mut KnowledgeBase,
    collapse: &[String],
    renderer: &mut PlainTextRenderer,
) -> bool {
    if let Err(err) = kb.collections(client).await {
        renderer.print_error(err.user_message());
        return false;
    }
    for name in collapse {
        if kb.toggle_expanded(name).is_none() {
            renderer.print_error(&format!("No collection named {name}"));
        }
    }
    match kb.collections(client).await {
        Ok(collections) => {
            renderer.print_collections(collections);
            true
        }
        Err(err) => {
            renderer.print_error(err.user_message());
            false
        }
    }
}

async fn upload(
    client: &MincaClient,
    kb: &mut KnowledgeBase,
    collection: &str,
    paths: &[PathBuf],
    renderer: &mut PlainTextRenderer,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(FileUpload::from_path(path).await?);
    }

    let mut queue = UploadQueue::new();
    let staged = match queue.stage(collection, files) {
        Ok(staged) => staged,
        Err(err) => {
            renderer.print_error(err.user_message());
            return Ok(false);
        }
    };
    if staged == 0 {
        renderer.print_error("Nothing to upload: only PDF files of 10 MB or less are accepted");
        return Ok(false);
    }
    if staged < paths.len() {
        renderer.print_info(&format!(
            "Skipped {} file(s) that are not PDFs of 10 MB or less",
            paths.len() - staged
        ));
    }

    let interrupt = Interrupt::install()?;
    let cancel = tokio_util::sync::CancellationToken::new();
    interrupt.arm(cancel.clone());
    queue
        .simulate_default(&cancel, |uploads| renderer.print_uploads(uploads))
        .await;
    interrupt.disarm();
    if cancel.is_cancelled() {
        renderer.print_interrupted();
        return Ok(false);
    }

    match kb.apply(client, &mut queue).await {
        Some(notification) => {
            renderer.print_notification(&notification);
            Ok(!notification.is_error())
        }
        None => Ok(false),
    }
}
