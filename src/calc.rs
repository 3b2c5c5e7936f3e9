//! Derivation engine for rope production measurements
//!
//! Pure, stateless arithmetic: four raw inputs in, eight derived values out.
//! Recomputed on every keystroke; rounding happens only at the display
//! boundary, the engine itself works at full f64 precision.

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DELICA_11_0_BEADS_PER_GRAM, PRECIOSA_10_0_BEADS_PER_GRAM, REFERENCE_SPAN_CM};

/// Raw form inputs, kept exactly as the user typed them.
///
/// Empty string means "not filled yet" and coerces to zero for computation.
/// The serialized key names (`A`..`D`) are the persisted-blob schema and must
/// not change, or previously saved state would be orphaned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    /// A: finished item length, centimeters
    #[serde(rename = "A", deserialize_with = "string_or_number")]
    pub length_cm: String,
    /// B: rows counted across a 5 cm reference span
    #[serde(rename = "B", deserialize_with = "string_or_number")]
    pub rows_per_5cm: String,
    /// C: rows in one pattern repeat
    #[serde(rename = "C", deserialize_with = "string_or_number")]
    pub rows_per_repeat: String,
    /// D: beads around one circumferential row
    #[serde(rename = "D", deserialize_with = "string_or_number")]
    pub beads_per_row: String,
}

/// Which of the four input fields a mutation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Length,
    RowsPer5Cm,
    RowsPerRepeat,
    BeadsPerRow,
}

impl Inputs {
    /// Coerce all four fields to finite numbers (empty/malformed -> 0)
    pub fn values(&self) -> InputValues {
        InputValues {
            length_cm: coerce(&self.length_cm, 0.0),
            rows_per_5cm: coerce(&self.rows_per_5cm, 0.0),
            rows_per_repeat: coerce(&self.rows_per_repeat, 0.0),
            beads_per_row: coerce(&self.beads_per_row, 0.0),
        }
    }

    /// Raw text of a field
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Length => &self.length_cm,
            InputField::RowsPer5Cm => &self.rows_per_5cm,
            InputField::RowsPerRepeat => &self.rows_per_repeat,
            InputField::BeadsPerRow => &self.beads_per_row,
        }
    }

    /// Store raw text into a field (no validation - coercion happens at read)
    pub fn set(&mut self, field: InputField, raw: &str) {
        let slot = match field {
            InputField::Length => &mut self.length_cm,
            InputField::RowsPer5Cm => &mut self.rows_per_5cm,
            InputField::RowsPerRepeat => &mut self.rows_per_repeat,
            InputField::BeadsPerRow => &mut self.beads_per_row,
        };
        *slot = raw.to_string();
    }
}

/// The coerced numeric view of [`Inputs`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputValues {
    pub length_cm: f64,
    pub rows_per_5cm: f64,
    pub rows_per_repeat: f64,
    pub beads_per_row: f64,
}

/// The eight derived values (E..L), a pure projection of [`InputValues`].
///
/// Never persisted as authoritative state - always recomputable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Derived {
    /// E = B / 5: rows per centimeter
    pub rows_per_cm: f64,
    /// F = A * E: total rows in the finished item
    pub total_rows: f64,
    /// G = F / A (0 when A = 0): rows-per-cm cross check
    pub rows_per_cm_check: f64,
    /// H = (F - C) / 2: rows to add on each side of the repeat
    pub rows_to_add_each_side: f64,
    /// I = H * D: beads to add on each side
    pub beads_to_add_each_side: f64,
    /// J = F * D: total bead count
    pub total_beads: f64,
    /// K = J / 40: bead weight in grams (Preciosa 10/0)
    pub weight_preciosa_g: f64,
    /// L = J / 200: bead weight in grams (Delica 11/0)
    pub weight_delica_g: f64,
}

/// Evaluate the formula chain in dependency order E -> F -> G -> H -> I -> J -> K -> L.
///
/// The only guarded division is G = F/A, whose denominator is a raw input;
/// every other denominator is a nonzero constant. H is deliberately left
/// unclamped when C > F (negative "rows to add" is shown as-is).
pub fn derive(v: &InputValues) -> Derived {
    let rows_per_cm = v.rows_per_5cm / REFERENCE_SPAN_CM;
    let total_rows = v.length_cm * rows_per_cm;
    let rows_per_cm_check = if v.length_cm != 0.0 {
        total_rows / v.length_cm
    } else {
        0.0
    };
    let rows_to_add_each_side = (total_rows - v.rows_per_repeat) / 2.0;
    let beads_to_add_each_side = rows_to_add_each_side * v.beads_per_row;
    let total_beads = total_rows * v.beads_per_row;

    Derived {
        rows_per_cm,
        total_rows,
        rows_per_cm_check,
        rows_to_add_each_side,
        beads_to_add_each_side,
        total_beads,
        weight_preciosa_g: total_beads / PRECIOSA_10_0_BEADS_PER_GRAM,
        weight_delica_g: total_beads / DELICA_11_0_BEADS_PER_GRAM,
    }
}

/// Coerce arbitrary text to a finite number.
///
/// Accepts a comma as the decimal separator, trims whitespace, and returns
/// `fallback` for anything that does not parse to a finite f64. This is the
/// single validation boundary for all numeric input in the app.
pub fn coerce(text: &str, fallback: f64) -> f64 {
    match text.trim().replace(',', ".").parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Presentation rounding: 2 decimal places, non-finite coerced to 0.
///
/// Applied right before display only - never inside the formula chain.
pub fn display_round(v: f64) -> f64 {
    if v.is_finite() {
        (v * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Accept either a JSON string or a JSON number for an input field.
///
/// Blobs saved by older versions of the page stored the applied-from-cheatsheet
/// B value as a bare number; everything we write is a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Num(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Num(n) => format_number(n),
    })
}

/// Format a number the way it reads in an input field (`28`, not `28.0`)
pub fn format_number(n: f64) -> String {
    if n.is_finite() { n.to_string() } else { String::new() }
}
