//! The ordered step catalog for the script interview.
//!
//! The table is the single source of truth for traversal order and for
//! which form field each step collects. Adding a step means adding a
//! table entry, not touching a conditional.

use std::fmt;

use super::WizardError;

/// Number of interview steps.
pub const STEP_COUNT: usize = 6;

/// A validated 1-based step index, always within `1..=STEP_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(u8);

impl StepId {
    /// First step of the interview.
    pub const FIRST: StepId = StepId(1);
    /// Final step of the interview.
    pub const LAST: StepId = StepId(STEP_COUNT as u8);

    /// Validate a raw 1-based index.
    pub fn new(index: u8) -> Result<Self, WizardError> {
        if (1..=STEP_COUNT as u8).contains(&index) {
            Ok(StepId(index))
        } else {
            Err(WizardError::InvalidStep(index))
        }
    }

    /// The 1-based index.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position into the step table.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// The following step, or `None` on the last step.
    pub fn next(self) -> Option<StepId> {
        if self == Self::LAST {
            None
        } else {
            Some(StepId(self.0 + 1))
        }
    }

    /// The preceding step, or `None` on the first step.
    pub fn prev(self) -> Option<StepId> {
        if self == Self::FIRST {
            None
        } else {
            Some(StepId(self.0 - 1))
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The form field a step collects. One field per step; the closed enum
/// means an unknown field key cannot exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Product,
    Persona,
    Industry,
    Goal,
    Tone,
    Objections,
}

impl FieldKey {
    /// All field keys in traversal order.
    pub fn all() -> &'static [FieldKey; STEP_COUNT] {
        &[
            FieldKey::Product,
            FieldKey::Persona,
            FieldKey::Industry,
            FieldKey::Goal,
            FieldKey::Tone,
            FieldKey::Objections,
        ]
    }

    /// Stable identifier used in serialized payloads and answer files.
    pub fn name(self) -> &'static str {
        match self {
            FieldKey::Product => "product",
            FieldKey::Persona => "persona",
            FieldKey::Industry => "industry",
            FieldKey::Goal => "goal",
            FieldKey::Tone => "tone",
            FieldKey::Objections => "objections",
        }
    }
}

/// One entry of the interview catalog.
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    /// The question the step asks.
    pub prompt: &'static str,
    /// Example answer shown by the empty input widget.
    pub placeholder: &'static str,
    pub field: FieldKey,
}

const STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        id: StepId(1),
        title: "Product",
        description: "What you sell",
        prompt: "What product or service are you selling?",
        placeholder: "e.g., Cloud-based CRM software that automates lead scoring \
                      and increases sales team productivity by 40%",
        field: FieldKey::Product,
    },
    StepDefinition {
        id: StepId(2),
        title: "Persona",
        description: "Who you call",
        prompt: "Who is your ideal customer?",
        placeholder: "e.g., Sales Directors at mid-size B2B companies (50-500 \
                      employees) struggling with manual lead qualification",
        field: FieldKey::Persona,
    },
    StepDefinition {
        id: StepId(3),
        title: "Industry",
        description: "Their sector",
        prompt: "What industry do you target?",
        placeholder: "e.g., Technology, Healthcare, Manufacturing",
        field: FieldKey::Industry,
    },
    StepDefinition {
        id: StepId(4),
        title: "Goal",
        description: "Call objective",
        prompt: "What's your call goal?",
        placeholder: "Select the primary objective for this call script",
        field: FieldKey::Goal,
    },
    StepDefinition {
        id: StepId(5),
        title: "Tone",
        description: "How you speak",
        prompt: "What tone should your script have?",
        placeholder: "Select the style that matches your brand and audience",
        field: FieldKey::Tone,
    },
    StepDefinition {
        id: StepId(6),
        title: "Objections",
        description: "What they say",
        prompt: "What objections do you commonly hear?",
        placeholder: "e.g., 'We're happy with our current solution', 'The price \
                      is too high', 'We don't have budget right now'",
        field: FieldKey::Objections,
    },
];

/// The full catalog in traversal order.
pub fn steps() -> &'static [StepDefinition; STEP_COUNT] {
    &STEPS
}

impl StepDefinition {
    /// Look up the catalog entry for a step.
    pub fn for_step(id: StepId) -> &'static StepDefinition {
        &STEPS[id.index()]
    }
}
