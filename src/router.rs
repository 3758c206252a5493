//! Routing surface: where the user lands once generation succeeds.
//!
//! The wizard shell invokes this exactly once per completed session,
//! guarded by the session's complete-once contract. The TUI implements
//! it by switching to the script output view; tests record the call.

use crate::generate::ScriptId;

pub trait ScriptRouter {
    /// Move the user to the display view for the generated script.
    fn route_to(&mut self, id: &ScriptId);
}

/// Test fake that remembers every routed id.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    pub routed: Vec<ScriptId>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptRouter for RecordingRouter {
    fn route_to(&mut self, id: &ScriptId) {
        self.routed.push(id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_router_remembers_ids() {
        let mut router = RecordingRouter::new();
        router.route_to(&ScriptId::new("42"));
        assert_eq!(router.routed, vec![ScriptId::new("42")]);
    }
}
