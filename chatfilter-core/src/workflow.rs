//! workflow.rs - Moderation of a single submission, from receipt to offense record.
//!
//! Every submission goes through the same steps regardless of surface:
//!
//! 1. Skip it if its surface is switched off or its actor is exempt.
//! 2. Censor every fragment against one settings snapshot.
//! 3. If nothing changed, stop. No side effects.
//! 4. Otherwise write the censored fragments back into the artifact, warn the
//!    actor once and append one offense record.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use std::sync::Arc;

use crate::engine::CensorEngine;
use crate::formatting::translate_color_codes;
use crate::offense_log::{OffenseRecord, OffenseSink};
use crate::settings::{FilterSettings, SharedSettings};
use crate::submission::{Actor, FragmentId, Submission, SurfaceEvent};

/// Capability that exempts an actor from moderation.
pub const BYPASS_CAPABILITY: &str = "chatfilter.bypass";

/// Capability required to reload the configuration.
pub const RELOAD_CAPABILITY: &str = "chatfilter.reload";

/// Answers capability questions about actors.
pub trait CapabilityOracle: Send + Sync {
    fn has_capability(&self, actor: &Actor, capability: &str) -> bool;
}

/// Delivers messages to actors. Delivery failures are the implementor's to swallow.
pub trait Notifier: Send + Sync {
    fn send(&self, actor: &Actor, message: &str);
}

/// Why a submission was not looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The surface toggle for this context is off.
    SurfaceDisabled,
    /// The actor is absent, offline, or holds the bypass capability.
    Exempt,
    /// The artifact carries no text to moderate.
    NothingToModerate,
}

/// Censoring result for one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentResult {
    pub id: FragmentId,
    pub text: String,
    pub changed: bool,
}

/// Censoring result for a whole submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensorResult {
    pub fragments: Vec<FragmentResult>,
    pub any_changed: bool,
}

impl CensorResult {
    /// Censored texts in fragment order, ready for [`SurfaceEvent::apply`].
    pub fn texts(&self) -> Vec<String> {
        self.fragments.iter().map(|f| f.text.clone()).collect()
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOutcome {
    Skipped(SkipReason),
    Unchanged,
    Censored {
        result: CensorResult,
        record: OffenseRecord,
        /// False when logging is off or the append failed.
        logged: bool,
    },
}

impl ModerationOutcome {
    pub fn is_censored(&self) -> bool {
        matches!(self, ModerationOutcome::Censored { .. })
    }
}

/// Runs `engine` over every fragment of `submission`.
pub fn censor_submission(engine: &dyn CensorEngine, submission: &Submission) -> CensorResult {
    let fragments: Vec<FragmentResult> = submission
        .fragments
        .iter()
        .map(|fragment| {
            let censored = engine.censor(&fragment.text);
            FragmentResult {
                id: fragment.id,
                text: censored.text,
                changed: censored.changed,
            }
        })
        .collect();
    let any_changed = fragments.iter().any(|f| f.changed);
    CensorResult { fragments, any_changed }
}

/// The per-submission moderation workflow, shared by every surface adapter.
pub struct ModerationWorkflow {
    settings: Arc<SharedSettings>,
    oracle: Arc<dyn CapabilityOracle>,
    notifier: Arc<dyn Notifier>,
    offense_log: Option<Arc<dyn OffenseSink>>,
}

impl ModerationWorkflow {
    pub fn new(
        settings: Arc<SharedSettings>,
        oracle: Arc<dyn CapabilityOracle>,
        notifier: Arc<dyn Notifier>,
        offense_log: Option<Arc<dyn OffenseSink>>,
    ) -> Self {
        Self {
            settings,
            oracle,
            notifier,
            offense_log,
        }
    }

    pub fn settings(&self) -> &Arc<SharedSettings> {
        &self.settings
    }

    /// True if the actor must not be moderated.
    pub fn is_exempt(&self, actor: Option<&Actor>) -> bool {
        match actor {
            None => true,
            Some(actor) if !actor.online => true,
            Some(actor) => self.oracle.has_capability(actor, BYPASS_CAPABILITY),
        }
    }

    /// Moderates one host event in place.
    ///
    /// On `Censored` the event already holds the censored text, the actor has
    /// been warned and the offense has been handed to the log.
    pub fn handle(&self, event: &mut SurfaceEvent, actor: Option<&Actor>) -> ModerationOutcome {
        let settings = self.settings.snapshot();
        let context = event.context();

        if !settings.toggles.is_enabled(context) {
            return ModerationOutcome::Skipped(SkipReason::SurfaceDisabled);
        }
        if self.is_exempt(actor) {
            debug!("Skipping {} submission from exempt actor.", context);
            return ModerationOutcome::Skipped(SkipReason::Exempt);
        }

        let submission = event.to_submission(actor.cloned());
        if submission.fragments.is_empty() {
            return ModerationOutcome::Skipped(SkipReason::NothingToModerate);
        }

        let result = censor_submission(&settings.catalog, &submission);
        if !result.any_changed {
            return ModerationOutcome::Unchanged;
        }

        event.apply(&result.texts());
        self.punish(&settings, submission, result)
    }

    /// Warns the actor and records the offense. Called once per changed submission.
    fn punish(&self, settings: &FilterSettings, submission: Submission, result: CensorResult) -> ModerationOutcome {
        if let Some(actor) = submission.actor.as_ref().filter(|a| a.online) {
            self.notifier
                .send(actor, &translate_color_codes(&settings.warning_message));
        }

        let record = OffenseRecord::new(submission.actor.as_ref(), submission.context, submission.original_text);
        let logged = match (&self.offense_log, settings.enable_logging) {
            (Some(sink), true) => match sink.append(&record) {
                Ok(()) => true,
                Err(e) => {
                    warn!("{}", e);
                    false
                }
            },
            _ => false,
        };

        ModerationOutcome::Censored { result, record, logged }
    }
}
