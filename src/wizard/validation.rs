//! The validation gate: per-step completeness rules.
//!
//! Pure functions of (step, form) with no side effects, cheap enough to
//! run on every keystroke to drive the Next/Generate affordance.

use serde::{Deserialize, Serialize};

use super::form::FormState;
use super::steps::{FieldKey, StepDefinition, StepId};

/// Call objectives accepted on the goal step. The stored form value is
/// the code string; anything outside this set fails the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallGoal {
    ScheduleDemo,
    BookMeeting,
    StartTrial,
    CloseSale,
    FollowUp,
    AskReferral,
}

impl CallGoal {
    pub fn all() -> &'static [CallGoal] {
        &[
            CallGoal::ScheduleDemo,
            CallGoal::BookMeeting,
            CallGoal::StartTrial,
            CallGoal::CloseSale,
            CallGoal::FollowUp,
            CallGoal::AskReferral,
        ]
    }

    pub fn code(self) -> &'static str {
        match self {
            CallGoal::ScheduleDemo => "schedule-demo",
            CallGoal::BookMeeting => "book-meeting",
            CallGoal::StartTrial => "start-trial",
            CallGoal::CloseSale => "close-sale",
            CallGoal::FollowUp => "follow-up",
            CallGoal::AskReferral => "ask-referral",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CallGoal::ScheduleDemo => "Schedule a demo",
            CallGoal::BookMeeting => "Book a discovery meeting",
            CallGoal::StartTrial => "Start a free trial",
            CallGoal::CloseSale => "Close the sale",
            CallGoal::FollowUp => "Follow up on proposal",
            CallGoal::AskReferral => "Ask for referrals",
        }
    }

    /// The closing ask a script built around this goal should make.
    pub fn ask(self) -> &'static str {
        match self {
            CallGoal::ScheduleDemo => "put twenty minutes on the calendar for a demo",
            CallGoal::BookMeeting => "book a short discovery meeting",
            CallGoal::StartTrial => "get you started on a free trial today",
            CallGoal::CloseSale => "get the paperwork over to you this week",
            CallGoal::FollowUp => "walk through the proposal together",
            CallGoal::AskReferral => "ask who else in your network should hear this",
        }
    }

    pub fn from_code(code: &str) -> Option<CallGoal> {
        CallGoal::all().iter().copied().find(|g| g.code() == code)
    }
}

/// Tone options offered by the tone step. Unlike the goal, the tone is
/// validated as free text; the enumeration only feeds the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneChoice {
    Professional,
    Friendly,
    Assertive,
    Casual,
    Consultative,
}

impl ToneChoice {
    pub fn all() -> &'static [ToneChoice] {
        &[
            ToneChoice::Professional,
            ToneChoice::Friendly,
            ToneChoice::Assertive,
            ToneChoice::Casual,
            ToneChoice::Consultative,
        ]
    }

    pub fn code(self) -> &'static str {
        match self {
            ToneChoice::Professional => "professional",
            ToneChoice::Friendly => "friendly",
            ToneChoice::Assertive => "assertive",
            ToneChoice::Casual => "casual",
            ToneChoice::Consultative => "consultative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToneChoice::Professional => "Professional & Formal",
            ToneChoice::Friendly => "Friendly & Conversational",
            ToneChoice::Assertive => "Assertive & Direct",
            ToneChoice::Casual => "Casual & Relaxed",
            ToneChoice::Consultative => "Consultative & Expert",
        }
    }
}

impl FieldKey {
    /// Whether a raw value satisfies this field's completeness rule.
    pub fn is_valid_value(self, value: &str) -> bool {
        match self {
            FieldKey::Goal => CallGoal::from_code(value.trim()).is_some(),
            _ => !value.trim().is_empty(),
        }
    }
}

/// The gate for a single step against the current answers.
pub fn is_step_valid(step: StepId, form: &FormState) -> bool {
    let field = StepDefinition::for_step(step).field;
    field.is_valid_value(form.get(field))
}
