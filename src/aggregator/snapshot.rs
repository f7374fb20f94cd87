use crate::window::WindowValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response entity for one request cycle.
///
/// Every field is an owned copy, independent of the live window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    /// Window before the merge
    pub window_prev_state: Vec<WindowValue>,
    /// Window after the merge
    pub window_curr_state: Vec<WindowValue>,
    /// Raw upstream result, duplicates and invalid entries included
    pub numbers: Vec<Value>,
    /// Average of `window_curr_state`, two decimals
    pub avg: f64,
}
