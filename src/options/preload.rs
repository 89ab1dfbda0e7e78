use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Preload", inline)]
#[serde(default)]
/// Frame preloading sizes.
pub struct PreloadOptions {
    /// Frames [0, initial_batch) loaded concurrently before the first tick.
    #[schemars(title = "Initial Batch", range(min = 0, max = 200))]
    pub initial_batch: usize,
    /// Frames loaded ahead of the play head on every tick.
    #[schemars(title = "Window", range(min = 1, max = 60))]
    pub window: usize,
}

impl Default for PreloadOptions {
    fn default() -> Self {
        Self {
            initial_batch: 20,
            window: 5,
        }
    }
}
