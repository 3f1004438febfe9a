//! Command-line arguments for the chat front-ends.
//!
//! Flags override the configuration file, which overrides the environment
//! defaults resolved by [`ClientConfig`].

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::{BASE_URL_ENV, ClientConfig, DATA_DIR_ENV};
use crate::error::Result;
use crate::types::ChatType;

/// Flags shared by every front-end.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    /// Backend base URL.
    #[arg(long, env = BASE_URL_ENV, value_name = "URL")]
    pub base_url: Option<String>,

    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for persisted session state.
    #[arg(long, env = DATA_DIR_ENV, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable ANSI colors and styles.
    #[arg(long)]
    pub no_color: bool,
}

impl CommonArgs {
    /// Resolves the client configuration these flags describe.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        Ok(config)
    }
}

/// Command-line arguments for minca-chat.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "minca-chat", about = "Talk to the Minca policy and sales assistants")]
pub struct ChatArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Assistant to talk to: policy or sales.
    #[arg(long, default_value_t = ChatType::Policy)]
    pub assistant: ChatType,

    /// Email to sign in with; prompts when omitted and no session is stored.
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Create an account with this username instead of signing in.
    #[arg(long, value_name = "USERNAME")]
    pub register: Option<String>,

    /// Open an existing chat on start.
    #[arg(long, value_name = "CHAT_ID")]
    pub open: Option<String>,
}

/// Command-line arguments for minca-widget.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "minca-widget", about = "The public Minca customer chat")]
pub struct WidgetArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Ignore the stored session and start fresh.
    #[arg(long)]
    pub fresh: bool,
}

/// Resolved settings of a chat front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Client settings.
    pub client: ClientConfig,

    /// Assistant used for new conversations.
    pub chat_type: ChatType,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            client: ClientConfig::new(),
            chat_type: ChatType::Policy,
            use_color: true,
        }
    }

    /// Sets the assistant.
    pub fn with_chat_type(mut self, chat_type: ChatType) -> Self {
        self.chat_type = chat_type;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Resolves configuration from minca-chat's arguments.
    pub fn from_args(args: &ChatArgs) -> Result<Self> {
        Ok(Self {
            client: args.common.client_config()?,
            chat_type: args.assistant,
            use_color: !args.common.no_color,
        })
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definitions_are_valid() {
        ChatArgs::command().debug_assert();
        WidgetArgs::command().debug_assert();
    }

    #[test]
    fn parse_chat_args() {
        let args = ChatArgs::try_parse_from([
            "minca-chat",
            "--base-url",
            "https://api.minca.example",
            "--assistant",
            "sales",
            "--no-color",
            "--open",
            "c-1",
        ])
        .unwrap();
        assert_eq!(args.assistant, ChatType::Sales);
        assert_eq!(args.open.as_deref(), Some("c-1"));
        assert!(args.common.no_color);

        let config = ChatConfig::from_args(&args).unwrap();
        assert_eq!(config.client.base_url, "https://api.minca.example");
        assert_eq!(config.chat_type, ChatType::Sales);
        assert!(!config.use_color);
    }

    #[test]
    fn assistant_accepts_route_names() {
        let args =
            ChatArgs::try_parse_from(["minca-chat", "--assistant", "insurance-expert"]).unwrap();
        assert_eq!(args.assistant, ChatType::Policy);
        assert!(ChatArgs::try_parse_from(["minca-chat", "--assistant", "legal"]).is_err());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_chat_type(ChatType::Sales)
            .without_color();
        assert_eq!(config.chat_type, ChatType::Sales);
        assert!(!config.use_color);
    }

    #[test]
    fn widget_args() {
        let args = WidgetArgs::try_parse_from(["minca-widget", "--fresh"]).unwrap();
        assert!(args.fresh);
    }
}
