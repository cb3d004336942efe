//! Brand canonicalization.
//!
//! The upstream feed spells the same retail brand many ways ("Coles Express"
//! and "Reddy Express" are both Shell sites). Stations carry both the raw
//! brand string and its canonical form so filtering and brand lists behave
//! consistently across spellings.

use std::collections::HashMap;

use crate::util::text::title_case;

/// Maps raw upstream brand strings to canonical brand names.
#[derive(Debug, Clone)]
pub struct BrandCanonicalizer {
    aliases: HashMap<String, String>,
}

impl BrandCanonicalizer {
    /// Builds a canonicalizer from `(canonical, aliases)` pairs. Alias lookup
    /// is case-insensitive on the trimmed raw string.
    pub fn new(table: &[(&str, &[&str])]) -> Self {
        let mut aliases = HashMap::new();
        for (canonical, raws) in table {
            for raw in *raws {
                aliases.insert(raw.to_lowercase(), (*canonical).to_string());
            }
        }
        Self { aliases }
    }

    /// Canonical form of a raw brand string. Unknown brands fall back to the
    /// title-cased raw value so they still group consistently.
    pub fn canonicalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self.aliases.get(&trimmed.to_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => title_case(trimmed),
        }
    }
}

impl Default for BrandCanonicalizer {
    fn default() -> Self {
        Self::new(&[
            ("Shell", &["shell", "coles express", "reddy express"]),
            ("Ampol", &["ampol", "caltex", "caltex woolworths", "eg ampol"]),
            ("7-Eleven", &["7-eleven", "7 eleven", "711"]),
            ("BP", &["bp"]),
            ("United", &["united", "united petroleum"]),
            ("Mobil", &["mobil", "x convenience mobil"]),
            ("Metro", &["metro", "metro fuel", "metro petroleum"]),
            ("Liberty", &["liberty"]),
            ("Independent", &["independent"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebranded_names_map_to_the_same_canonical_brand() {
        let brands = BrandCanonicalizer::default();
        assert_eq!(brands.canonicalize("Coles Express"), "Shell");
        assert_eq!(brands.canonicalize("Reddy Express"), "Shell");
        assert_eq!(brands.canonicalize("Shell"), "Shell");
    }

    #[test]
    fn lookup_ignores_case_and_surrounding_whitespace() {
        let brands = BrandCanonicalizer::default();
        assert_eq!(brands.canonicalize("  CALTEX "), "Ampol");
        assert_eq!(brands.canonicalize("bp"), "BP");
        assert_eq!(brands.canonicalize("7 ELEVEN"), "7-Eleven");
    }

    #[test]
    fn unknown_brands_fall_back_to_title_case() {
        let brands = BrandCanonicalizer::default();
        assert_eq!(brands.canonicalize("SPEEDWAY fuel"), "Speedway Fuel");
    }
}
