//! The interview wizard: an ordered-step state machine with per-step
//! validation gating and a single async generation handoff.
//!
//! [`WizardSession`] is a plain value; navigation calls are
//! deterministic transition functions that return a [`NavOutcome`]
//! event, so the presentation layer can react to movement without the
//! core knowing anything about rendering. Every guard degrades to a
//! no-op; the only failure surface is the generation service itself.

use thiserror::Error;

pub mod form;
pub mod steps;
pub mod validation;

pub use form::FormState;
pub use steps::{steps, FieldKey, StepDefinition, StepId, STEP_COUNT};
pub use validation::{is_step_valid, CallGoal, ToneChoice};


/// Contract violations. These never reach a user through normal
/// interaction; they mark programming errors at raw-input boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("step index {0} is out of range (valid: 1..={STEP_COUNT})")]
    InvalidStep(u8),

    #[error("'{0}' is not a recognized call goal")]
    UnknownGoal(String),
}

/// Where the session is in its submission lifecycle. Transitions only
/// ever run Idle → Submitting → Completed, except that a failed
/// generation drops Submitting back to Idle so the rep can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleStatus {
    #[default]
    Idle,
    Submitting,
    Completed,
}

/// The observable machine state, derived from step + lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    AtStep(StepId),
    Submitting,
    Completed,
}

/// Event emitted by a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The current step changed.
    Moved { from: StepId, to: StepId },
    /// The final step was confirmed; the shell must start generation.
    Submit,
    /// A guard blocked the transition, or it was a no-op.
    Stay,
}

/// One rep's pass through the interview, from first question to
/// generated script. Created when the wizard is entered, discarded once
/// the session completes and the shell routes to the artifact.
#[derive(Debug, Clone)]
pub struct WizardSession {
    current: StepId,
    status: LifecycleStatus,
    form: FormState,
    /// Dismissible notice left behind by a failed generation.
    notice: Option<String>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            current: StepId::FIRST,
            status: LifecycleStatus::Idle,
            form: FormState::new(),
            notice: None,
        }
    }

    pub fn current_step(&self) -> StepId {
        self.current
    }

    pub fn status(&self) -> LifecycleStatus {
        self.status
    }

    pub fn state(&self) -> WizardState {
        match self.status {
            LifecycleStatus::Idle => WizardState::AtStep(self.current),
            LifecycleStatus::Submitting => WizardState::Submitting,
            LifecycleStatus::Completed => WizardState::Completed,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Replace one answer. Safe to call on every keystroke.
    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
        self.form.set(key, value);
    }

    /// Whether the forward affordance should be enabled right now.
    /// This is the only state the shell needs to poll continuously.
    pub fn can_advance(&self) -> bool {
        self.status == LifecycleStatus::Idle && is_step_valid(self.current, &self.form)
    }

    /// Advance past the current step, or hand off to generation from
    /// the last one. Blocked while the step is incomplete and ignored
    /// entirely once submission has started, so repeat calls can never
    /// issue a second generation.
    pub fn go_forward(&mut self) -> NavOutcome {
        if self.status != LifecycleStatus::Idle {
            return NavOutcome::Stay;
        }
        if !is_step_valid(self.current, &self.form) {
            tracing::debug!(step = %self.current, "forward blocked: step incomplete");
            return NavOutcome::Stay;
        }
        match self.current.next() {
            Some(next) => {
                let from = self.current;
                self.current = next;
                tracing::debug!(%from, to = %next, "advanced");
                NavOutcome::Moved { from, to: next }
            }
            None => {
                self.status = LifecycleStatus::Submitting;
                self.notice = None;
                tracing::info!("interview complete, submitting for generation");
                tracing::debug!(answers = ?self.form.as_map(), "submission payload");
                NavOutcome::Submit
            }
        }
    }

    /// Return to the previous step. Always allowed while idle on any
    /// step but the first; a no-op everywhere else. Reviewing earlier
    /// answers never requires the step being left to stay valid.
    pub fn go_back(&mut self) -> NavOutcome {
        if self.status != LifecycleStatus::Idle {
            return NavOutcome::Stay;
        }
        match self.current.prev() {
            Some(prev) => {
                let from = self.current;
                self.current = prev;
                tracing::debug!(%from, to = %prev, "went back");
                NavOutcome::Moved { from, to: prev }
            }
            None => NavOutcome::Stay,
        }
    }

    /// Record a successful generation. Returns true exactly once per
    /// session, so the caller can invoke routing without double-firing.
    pub fn complete(&mut self) -> bool {
        if self.status == LifecycleStatus::Submitting {
            self.status = LifecycleStatus::Completed;
            true
        } else {
            tracing::warn!(status = ?self.status, "complete() outside of submission ignored");
            false
        }
    }

    /// Record a failed generation: back to the final step with every
    /// answer intact and a notice for the shell to surface.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status == LifecycleStatus::Submitting {
            self.status = LifecycleStatus::Idle;
            self.notice = Some(message.into());
            tracing::warn!("generation failed, session returned to final step");
        } else {
            tracing::warn!(status = ?self.status, "fail() outside of submission ignored");
        }
    }

    /// The notice from the last failed generation, if not yet dismissed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
