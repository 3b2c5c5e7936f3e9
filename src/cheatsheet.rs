//! Cheatsheet: rows-per-5cm reference table for common bead formats
//!
//! Lets the user fill input B from a known bead brand instead of measuring.
//! Ordered, per-cell editable, persisted alongside the inputs.

use serde::{Deserialize, Serialize};

/// One cheatsheet row.
///
/// `pivstovchyk` / `stovpchyk` are the half-column and full-column stitch
/// densities (rows per 5 cm). The Ukrainian field names are the persisted
/// schema and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheatsheetEntry {
    /// Bead brand/format label, e.g. "Miyuki delica 11/0"
    pub brand: String,
    /// Rows per 5 cm, half-column stitch
    pub pivstovchyk: f64,
    /// Rows per 5 cm, full-column stitch
    pub stovpchyk: f64,
}

impl CheatsheetEntry {
    pub fn new(brand: &str, pivstovchyk: f64, stovpchyk: f64) -> Self {
        Self {
            brand: brand.to_string(),
            pivstovchyk,
            stovpchyk,
        }
    }
}

/// The four built-in rows the table resets to
pub fn default_entries() -> Vec<CheatsheetEntry> {
    vec![
        CheatsheetEntry::new("Preciosa 10/0", 28.0, 26.0),
        CheatsheetEntry::new("Miyuki delica 11/0", 40.0, 35.0),
        CheatsheetEntry::new("Miyuki RR 11/0", 35.0, 33.0),
        CheatsheetEntry::new("Miyuki RR 15/0", 48.0, 45.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries() {
        let entries = default_entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].brand, "Preciosa 10/0");
        assert_eq!(entries[0].pivstovchyk, 28.0);
        assert_eq!(entries[0].stovpchyk, 26.0);
        assert_eq!(entries[3].brand, "Miyuki RR 15/0");
        assert_eq!(entries[3].pivstovchyk, 48.0);
    }

    #[test]
    fn test_entry_schema_field_names() {
        let json = serde_json::to_string(&default_entries()[1]).unwrap();
        assert!(json.contains("\"brand\""));
        assert!(json.contains("\"pivstovchyk\""));
        assert!(json.contains("\"stovpchyk\""));
    }
}
