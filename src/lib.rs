//! Bead rope length calculator - offline-first PWA
//!
//! Core modules:
//! - `calc`: pure derivation engine (four inputs -> eight derived values)
//! - `cheatsheet`: rows-per-5cm reference table for common bead formats
//! - `store`: app state container + LocalStorage persistence
//!
//! All logic is platform-independent; the wasm32 binary wires it to the DOM.

pub mod calc;
pub mod cheatsheet;
pub mod store;

pub use calc::{Derived, InputField, InputValues, Inputs, coerce, derive, display_round};
pub use cheatsheet::CheatsheetEntry;
pub use store::AppState;

/// Formula constants
pub mod consts {
    /// Reference span input B is measured over (centimeters)
    pub const REFERENCE_SPAN_CM: f64 = 5.0;
    /// Approximate beads per gram, Preciosa 10/0 (divisor for weight K)
    pub const PRECIOSA_10_0_BEADS_PER_GRAM: f64 = 40.0;
    /// Approximate beads per gram, Miyuki Delica 11/0 (divisor for weight L)
    pub const DELICA_11_0_BEADS_PER_GRAM: f64 = 200.0;
}
