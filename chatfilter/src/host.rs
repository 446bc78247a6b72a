//! The JSON-lines host protocol and the host-side adapters behind it.
//!
//! Each request is one JSON object per line on stdin:
//!
//! ```json
//! {"type":"submission","actor":{"name":"Steve","id":"…","permissions":[]},"event":{"surface":"chat","message":"hi"}}
//! {"type":"command","sender":null,"args":["reload"]}
//! {"type":"tab_complete","sender":{"name":"Alex","id":"…","permissions":["chatfilter.reload"]},"args":["re"]}
//! ```
//!
//! A missing `actor` is an unknown actor and a missing `sender` is the
//! console. Responses are written one per line on stdout.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

use chatfilter_core::{
    Actor, CapabilityOracle, CommandReply, CommandSender, ModerationOutcome, Notifier, ReplyTone, SkipReason,
    SurfaceEvent,
};

/// Errors that stop a single bridge request.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An actor as described by the host, with the capabilities it holds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostActor {
    #[serde(flatten)]
    pub actor: Actor,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// One request from the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    Submission {
        #[serde(default)]
        actor: Option<HostActor>,
        event: SurfaceEvent,
    },
    Command {
        #[serde(default)]
        sender: Option<HostActor>,
        #[serde(default)]
        args: Vec<String>,
    },
    TabComplete {
        #[serde(default)]
        sender: Option<HostActor>,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl HostRequest {
    pub fn parse(line: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// How a submission ended, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Censored,
    Unchanged,
    Skipped,
}

/// One response line to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostResponse {
    /// A message the host must deliver to an actor.
    Notify { actor: String, id: Uuid, message: String },
    /// The result of a submission; `event` holds the text to use from now on.
    Outcome {
        status: OutcomeStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        event: SurfaceEvent,
        logged: bool,
    },
    Reply { tone: String, text: String, formatted: String },
    Completions { items: Vec<String> },
    Error { message: String },
}

impl HostResponse {
    pub fn outcome(outcome: &ModerationOutcome, event: SurfaceEvent) -> Self {
        let (status, reason, logged) = match outcome {
            ModerationOutcome::Skipped(reason) => (OutcomeStatus::Skipped, Some(skip_reason_name(*reason)), false),
            ModerationOutcome::Unchanged => (OutcomeStatus::Unchanged, None, false),
            ModerationOutcome::Censored { logged, .. } => (OutcomeStatus::Censored, None, *logged),
        };
        HostResponse::Outcome {
            status,
            reason: reason.map(str::to_string),
            event,
            logged,
        }
    }

    pub fn reply(reply: &CommandReply) -> Self {
        let tone = match reply.tone {
            ReplyTone::Success => "success",
            ReplyTone::Usage => "usage",
            ReplyTone::Error => "error",
        };
        HostResponse::Reply {
            tone: tone.to_string(),
            text: reply.text.clone(),
            formatted: reply.formatted(),
        }
    }
}

fn skip_reason_name(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::SurfaceDisabled => "surface_disabled",
        SkipReason::Exempt => "exempt",
        SkipReason::NothingToModerate => "nothing_to_moderate",
    }
}

/// Capabilities last reported by the host, keyed by actor id.
#[derive(Debug, Default)]
pub struct PermissionTable {
    grants: RwLock<HashMap<Uuid, HashSet<String>>>,
}

impl PermissionTable {
    /// Replaces the stored capabilities of this actor with the ones it arrived with.
    pub fn record(&self, host_actor: &HostActor) {
        let mut grants = self.grants.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        grants.insert(
            host_actor.actor.id,
            host_actor.permissions.iter().cloned().collect(),
        );
    }
}

impl CapabilityOracle for PermissionTable {
    fn has_capability(&self, actor: &Actor, capability: &str) -> bool {
        let grants = self.grants.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        grants
            .get(&actor.id)
            .map_or(false, |caps| caps.contains(capability))
    }
}

/// Collects notifications until the bridge writes them out.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    queue: Mutex<Vec<HostResponse>>,
}

impl QueuedNotifier {
    pub fn drain(&self) -> Vec<HostResponse> {
        let mut queue = self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *queue)
    }
}

impl Notifier for QueuedNotifier {
    fn send(&self, actor: &Actor, message: &str) {
        let mut queue = self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        queue.push(HostResponse::Notify {
            actor: actor.name.clone(),
            id: actor.id,
            message: message.to_string(),
        });
    }
}

/// Turns an optional host actor into a command sender.
pub fn command_sender(sender: Option<&HostActor>) -> CommandSender {
    match sender {
        Some(host_actor) => CommandSender::Actor(host_actor.actor.clone()),
        None => CommandSender::Console,
    }
}
