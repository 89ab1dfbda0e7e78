use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key strings.
///
/// Key strings are DOM `KeyboardEvent.key` values (`" "`, `"ArrowRight"`).
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `TogglePlayback` → `" "`).
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::TogglePlayback, " ".into()),
            (KeyAction::NudgeForward, "ArrowRight".into()),
            (KeyAction::NudgeBackward, "ArrowLeft".into()),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find_map(|(action, bound)| (bound == key).then_some(*action))
    }
}
