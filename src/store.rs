//! Application state and its LocalStorage persistence
//!
//! The whole app state lives in one value, serialized to a single fixed
//! LocalStorage key on every mutation and restored on startup. Storage
//! failures never surface: load falls back to defaults, a failed save just
//! leaves the on-disk blob stale while the in-memory state stays
//! authoritative for the session.

use serde::{Deserialize, Serialize};

use crate::calc::{InputField, Inputs, coerce, format_number};
use crate::cheatsheet::{CheatsheetEntry, default_entries};

/// Complete persisted state: raw inputs plus the cheatsheet table.
///
/// The JSON shape (`inputs`/`cheatsheet` keys, `A`..`D`, Ukrainian column
/// names) is shared with blobs written by earlier versions of the page and
/// must not change - there is no migration path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub inputs: Inputs,
    pub cheatsheet: Vec<CheatsheetEntry>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            inputs: Inputs::default(),
            cheatsheet: default_entries(),
        }
    }
}

impl AppState {
    /// LocalStorage key (v2 of the blob schema, kept from the original page)
    pub const STORAGE_KEY: &'static str = "bead-rope-data-v2";

    /// Parse a persisted blob; anything malformed falls back to defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding malformed saved state: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize for persistence
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    // === Mutation entry points ===
    // Every mutation goes through one of these; the caller follows up with
    // recompute + save.

    /// Store raw text into one of the four input fields
    pub fn set_input(&mut self, field: InputField, raw: &str) {
        self.inputs.set(field, raw);
    }

    /// Rename a cheatsheet row
    pub fn set_brand(&mut self, index: usize, text: &str) {
        if let Some(entry) = self.cheatsheet.get_mut(index) {
            entry.brand = text.to_string();
        }
    }

    /// Edit a half-column cell; malformed input keeps the previous value
    pub fn set_pivstovchyk(&mut self, index: usize, raw: &str) {
        if let Some(entry) = self.cheatsheet.get_mut(index) {
            entry.pivstovchyk = coerce(raw, entry.pivstovchyk);
        }
    }

    /// Edit a full-column cell; malformed input keeps the previous value
    pub fn set_stovpchyk(&mut self, index: usize, raw: &str) {
        if let Some(entry) = self.cheatsheet.get_mut(index) {
            entry.stovpchyk = coerce(raw, entry.stovpchyk);
        }
    }

    /// Per-row "apply to B": copy the row's half-column density into input B
    pub fn apply_to_rows_input(&mut self, index: usize) {
        if let Some(entry) = self.cheatsheet.get(index) {
            let value = format_number(entry.pivstovchyk);
            self.inputs.set(InputField::RowsPer5Cm, &value);
        }
    }

    /// Replace the cheatsheet wholesale with the four built-in rows
    pub fn reset_cheatsheet(&mut self) {
        self.cheatsheet = default_entries();
    }

    /// Load state from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded saved state");
                return Self::from_json(&json);
            }
        }

        log::info!("No saved state, using defaults");
        Self::default()
    }

    /// Save state to LocalStorage (WASM only). Write failures are dropped.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Some(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut state = AppState::default();
        state.set_input(InputField::Length, "100");
        state.set_input(InputField::RowsPer5Cm, "12,5");
        state.set_brand(2, "Toho 11/0");
        state.set_pivstovchyk(2, "37");

        let json = state.to_json().unwrap();
        assert_eq!(AppState::from_json(&json), state);
    }

    #[test]
    fn test_schema_field_names_are_stable() {
        let mut state = AppState::default();
        state.set_input(InputField::Length, "100");
        let json = state.to_json().unwrap();
        assert!(json.contains("\"inputs\""));
        assert!(json.contains("\"cheatsheet\""));
        assert!(json.contains("\"A\":\"100\""));
        assert!(json.contains("\"B\":\"\""));
    }

    #[test]
    fn test_malformed_blob_falls_back_to_defaults() {
        assert_eq!(AppState::from_json(""), AppState::default());
        assert_eq!(AppState::from_json("not json"), AppState::default());
        assert_eq!(AppState::from_json("{\"inputs\":42}"), AppState::default());
        assert_eq!(AppState::from_json("null"), AppState::default());
    }

    #[test]
    fn test_loads_blob_with_numeric_input_field() {
        // The original page stored an applied-from-cheatsheet B as a number
        let json = r#"{
            "inputs": {"A": "50", "B": 28, "C": "", "D": "6"},
            "cheatsheet": [{"brand": "Preciosa 10/0", "pivstovchyk": 28, "stovpchyk": 26}]
        }"#;
        let state = AppState::from_json(json);
        assert_eq!(state.inputs.rows_per_5cm, "28");
        assert_eq!(state.inputs.length_cm, "50");
        assert_eq!(state.cheatsheet.len(), 1);
    }

    #[test]
    fn test_cell_edit_keeps_previous_on_malformed_input() {
        let mut state = AppState::default();
        state.set_pivstovchyk(0, "abc");
        assert_eq!(state.cheatsheet[0].pivstovchyk, 28.0);
        state.set_pivstovchyk(0, "30");
        assert_eq!(state.cheatsheet[0].pivstovchyk, 30.0);
        // Out-of-range index is a no-op
        state.set_stovpchyk(99, "1");
    }

    #[test]
    fn test_apply_to_rows_input() {
        let mut state = AppState::default();
        state.apply_to_rows_input(1);
        assert_eq!(state.inputs.rows_per_5cm, "40");
        // Stays a string in the blob we write
        let json = state.to_json().unwrap();
        assert!(json.contains("\"B\":\"40\""));
    }

    #[test]
    fn test_saved_blob_to_derived_values() {
        use crate::calc::derive;

        let json = r#"{
            "inputs": {"A": "100", "B": "20", "C": "10", "D": "6"},
            "cheatsheet": []
        }"#;
        let state = AppState::from_json(json);
        let d = derive(&state.inputs.values());
        assert_eq!(d.rows_per_cm, 4.0);
        assert_eq!(d.total_rows, 400.0);
        assert_eq!(d.total_beads, 2400.0);
        assert_eq!(d.weight_preciosa_g, 60.0);
    }

    #[test]
    fn test_reset_cheatsheet_restores_builtins() {
        let mut state = AppState::default();
        state.set_brand(0, "scribbled over");
        state.set_pivstovchyk(0, "1");
        state.cheatsheet.remove(3);
        state.reset_cheatsheet();
        assert_eq!(state.cheatsheet, default_entries());
    }
}
