//! `chatfilter run`: moderate host submissions over line-delimited JSON.

use anyhow::{Context as _, Result};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::sync::Arc;

use chatfilter_core::{
    AdminCommand, ConfigSource, ModerationWorkflow, OffenseSink, SharedSettings,
};

use crate::host::{command_sender, BridgeError, HostRequest, HostResponse, PermissionTable, QueuedNotifier};

/// Everything one bridge session needs, wired around a single settings holder.
pub struct Bridge {
    workflow: ModerationWorkflow,
    command: AdminCommand,
    permissions: Arc<PermissionTable>,
    notices: Arc<QueuedNotifier>,
}

impl Bridge {
    pub fn new(
        settings: Arc<SharedSettings>,
        source: Arc<dyn ConfigSource>,
        offense_log: Option<Arc<dyn OffenseSink>>,
    ) -> Self {
        let permissions = Arc::new(PermissionTable::default());
        let notices = Arc::new(QueuedNotifier::default());
        let workflow = ModerationWorkflow::new(settings.clone(), permissions.clone(), notices.clone(), offense_log);
        let command = AdminCommand::new(settings, permissions.clone(), source);
        Self {
            workflow,
            command,
            permissions,
            notices,
        }
    }

    /// Handles one request line. Notifications come before the outcome they belong to.
    pub fn handle_line(&self, line: &str) -> Vec<HostResponse> {
        match HostRequest::parse(line) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                warn!("{}", e);
                vec![HostResponse::Error { message: e.to_string() }]
            }
        }
    }

    pub fn handle_request(&self, request: HostRequest) -> Vec<HostResponse> {
        match request {
            HostRequest::Submission { actor, mut event } => {
                if let Some(host_actor) = &actor {
                    self.permissions.record(host_actor);
                }
                let outcome = self.workflow.handle(&mut event, actor.as_ref().map(|a| &a.actor));
                let mut responses = self.notices.drain();
                responses.push(HostResponse::outcome(&outcome, event));
                responses
            }
            HostRequest::Command { sender, args } => {
                if let Some(host_actor) = &sender {
                    self.permissions.record(host_actor);
                }
                let reply = self.command.execute(&command_sender(sender.as_ref()), args.as_slice());
                vec![HostResponse::reply(&reply)]
            }
            HostRequest::TabComplete { sender, args } => {
                if let Some(host_actor) = &sender {
                    self.permissions.record(host_actor);
                }
                let items = self.command.tab_complete(&command_sender(sender.as_ref()), args.as_slice());
                vec![HostResponse::Completions { items }]
            }
        }
    }
}

/// Reads requests from `input` until EOF, writing responses to `output`.
///
/// Blank lines are ignored. Malformed lines, including lines that are not
/// valid UTF-8, produce an `error` response and the session continues.
pub fn run_bridge<R: BufRead, W: Write>(bridge: &Bridge, input: R, output: &mut W) -> Result<usize> {
    info!("Bridge session started.");
    let mut handled = 0;
    for raw in input.split(b'\n') {
        let mut raw = raw.map_err(BridgeError::from).context("Failed to read request")?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let responses = match std::str::from_utf8(&raw) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => bridge.handle_line(line),
            Err(e) => {
                warn!("Request is not valid UTF-8: {}", e);
                vec![HostResponse::Error {
                    message: format!("Request is not valid UTF-8: {}", e),
                }]
            }
        };
        for response in responses {
            serde_json::to_writer(&mut *output, &response).context("Failed to encode response")?;
            writeln!(output)?;
        }
        output.flush()?;
        handled += 1;
    }
    debug!("Bridge session ended after {} request(s).", handled);
    Ok(handled)
}
