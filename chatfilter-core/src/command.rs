//! The `/chatfilter` administrative command.
//!
//! A single subcommand, `reload`, re-reads the configuration and swaps the
//! shared settings. It requires [`RELOAD_CAPABILITY`]. The console is always
//! allowed.

use log::{info, warn};
use std::sync::Arc;

use crate::config::ConfigSource;
use crate::formatting::COLOR_CHAR;
use crate::settings::SharedSettings;
use crate::submission::Actor;
use crate::workflow::{CapabilityOracle, RELOAD_CAPABILITY};

pub const COMMAND_NAME: &str = "chatfilter";
const RELOAD_ARG: &str = "reload";

/// Who issued the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    Console,
    Actor(Actor),
}

/// Colour of a command reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTone {
    Success,
    Usage,
    Error,
}

impl ReplyTone {
    /// The format code for this tone (green, yellow, red).
    pub fn code(&self) -> char {
        match self {
            ReplyTone::Success => 'a',
            ReplyTone::Usage => 'e',
            ReplyTone::Error => 'c',
        }
    }
}

/// A reply addressed to the command sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub tone: ReplyTone,
    pub text: String,
}

impl CommandReply {
    fn new(tone: ReplyTone, text: impl Into<String>) -> Self {
        Self { tone, text: text.into() }
    }

    /// The reply with its leading `§` colour code.
    pub fn formatted(&self) -> String {
        format!("{}{}{}", COLOR_CHAR, self.tone.code(), self.text)
    }
}

/// Executes and tab-completes `/chatfilter`.
pub struct AdminCommand {
    settings: Arc<SharedSettings>,
    oracle: Arc<dyn CapabilityOracle>,
    source: Arc<dyn ConfigSource>,
}

impl AdminCommand {
    pub fn new(
        settings: Arc<SharedSettings>,
        oracle: Arc<dyn CapabilityOracle>,
        source: Arc<dyn ConfigSource>,
    ) -> Self {
        Self { settings, oracle, source }
    }

    fn can_reload(&self, sender: &CommandSender) -> bool {
        match sender {
            CommandSender::Console => true,
            CommandSender::Actor(actor) => self.oracle.has_capability(actor, RELOAD_CAPABILITY),
        }
    }

    pub fn execute<S: AsRef<str>>(&self, sender: &CommandSender, args: &[S]) -> CommandReply {
        if args.len() != 1 || !args[0].as_ref().eq_ignore_ascii_case(RELOAD_ARG) {
            return CommandReply::new(ReplyTone::Usage, format!("Usage: /{} {}", COMMAND_NAME, RELOAD_ARG));
        }

        if !self.can_reload(sender) {
            return CommandReply::new(ReplyTone::Error, "You don't have permission to use this command.");
        }

        // A config that cannot be read or parsed leaves the current settings in place.
        match self.source.load() {
            Ok(config) => {
                let settings = self.settings.reload(&config);
                info!("Configuration reloaded, now at version {}.", settings.version);
                CommandReply::new(ReplyTone::Success, "ChatFilter configuration reloaded successfully!")
            }
            Err(e) => {
                warn!("Reload failed, keeping previous configuration: {:#}", e);
                CommandReply::new(ReplyTone::Error, format!("Failed to reload configuration: {}", e))
            }
        }
    }

    pub fn tab_complete<S: AsRef<str>>(&self, sender: &CommandSender, args: &[S]) -> Vec<String> {
        if args.len() != 1 || !self.can_reload(sender) {
            return Vec::new();
        }
        if RELOAD_ARG.starts_with(&args[0].as_ref().to_lowercase()) {
            vec![RELOAD_ARG.to_string()]
        } else {
            Vec::new()
        }
    }
}
