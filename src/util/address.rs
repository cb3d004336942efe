//! Address normalization heuristics.
//!
//! Upstream station records sometimes carry structured suburb/state/postcode
//! fields and sometimes only a free-text address line. The normalizer trusts
//! structured fields when present and falls back to pattern extraction over
//! the trailing segment of the address. Extraction is best-effort: a field
//! that cannot be recovered stays `None` and never fails the record.

use regex::Regex;

use crate::util::text::title_case;

/// Region-specific vocabulary the extraction patterns are built from.
#[derive(Debug, Clone)]
pub struct AddressVocabulary {
    pub state_abbreviations: Vec<String>,
    pub road_suffixes: Vec<String>,
}

impl Default for AddressVocabulary {
    fn default() -> Self {
        Self {
            state_abbreviations: ["NSW", "ACT", "VIC", "QLD", "SA", "WA", "TAS", "NT"]
                .map(String::from)
                .to_vec(),
            road_suffixes: [
                "st", "street", "rd", "road", "hwy", "highway", "ave", "avenue", "av", "dr",
                "drive", "pde", "parade", "blvd", "boulevard", "cres", "crescent", "ln", "lane",
                "pl", "place", "way", "ct", "court", "tce", "terrace", "esp", "esplanade", "cl",
                "close",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Normalized suburb/state/postcode for one station record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
}

/// Resolves suburb, state, and postcode from structured fields plus a
/// free-text address line.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    road_suffixes: Vec<String>,
    state_postcode: Regex,
    state: Regex,
}

impl AddressNormalizer {
    pub fn new(vocabulary: &AddressVocabulary) -> Self {
        let states = vocabulary.state_abbreviations.join("|");
        Self {
            road_suffixes: vocabulary
                .road_suffixes
                .iter()
                .map(|suffix| suffix.to_lowercase())
                .collect(),
            state_postcode: Regex::new(&format!(r"(?i)\b({states})\s+(\d{{4}})\b"))
                .expect("valid state/postcode pattern"),
            state: Regex::new(&format!(r"(?i)\b({states})\b")).expect("valid state pattern"),
        }
    }

    /// Structured fields win when present and non-blank; anything missing is
    /// recovered from the trailing comma-separated segment of the address.
    pub fn resolve(
        &self,
        suburb: Option<&str>,
        state: Option<&str>,
        postcode: Option<&str>,
        address: &str,
    ) -> ResolvedAddress {
        let mut resolved = ResolvedAddress {
            suburb: non_blank(suburb).map(title_case),
            state: non_blank(state).map(str::to_uppercase),
            postcode: non_blank(postcode).map(str::to_string),
        };

        if resolved.suburb.is_some() && resolved.state.is_some() && resolved.postcode.is_some() {
            return resolved;
        }

        // The suburb/state/postcode conventionally sit in the last segment.
        let tail = address.rsplit(',').next().unwrap_or("").trim();
        if tail.is_empty() {
            return resolved;
        }

        if let Some(captures) = self.state_postcode.captures_iter(tail).last() {
            resolved.state = resolved
                .state
                .or_else(|| captures.get(1).map(|m| m.as_str().to_uppercase()));
            resolved.postcode = resolved
                .postcode
                .or_else(|| captures.get(2).map(|m| m.as_str().to_string()));
        }
        if resolved.state.is_none() {
            resolved.state = self
                .state
                .find_iter(tail)
                .last()
                .map(|m| m.as_str().to_uppercase());
        }
        if resolved.postcode.is_none() {
            resolved.postcode = trailing_postcode(tail).map(str::to_string);
        }
        if resolved.suburb.is_none() {
            resolved.suburb = self.extract_suburb(tail);
        }

        resolved
    }

    /// Walks the cleaned tail segment backwards, accumulating words until a
    /// street-number-like token or a road suffix is reached.
    fn extract_suburb(&self, tail: &str) -> Option<String> {
        let cleaned = self.state_postcode.replace_all(tail, " ");
        let cleaned = self.state.replace_all(&cleaned, " ");

        let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if let Some(last) = tokens.last() {
            if last.len() == 4 && last.chars().all(|c| c.is_ascii_digit()) {
                tokens.pop();
            }
        }

        let mut words = Vec::new();
        for token in tokens.iter().rev() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            if word.chars().any(|c| c.is_ascii_digit())
                || self.road_suffixes.contains(&word.to_lowercase())
            {
                break;
            }
            words.push(word);
        }

        if words.is_empty() {
            // Last resort: everything in the tail that is not a number.
            let fallback = tokens
                .iter()
                .filter(|token| !token.chars().any(|c| c.is_ascii_digit()))
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            return (!fallback.is_empty()).then(|| title_case(&fallback));
        }

        words.reverse();
        Some(title_case(&words.join(" ")))
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new(&AddressVocabulary::default())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn trailing_postcode(tail: &str) -> Option<&str> {
    let last = tail.split_whitespace().last()?;
    (last.len() == 4 && last.chars().all(|c| c.is_ascii_digit())).then_some(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> AddressNormalizer {
        AddressNormalizer::default()
    }

    #[test]
    fn extracts_all_fields_from_a_plain_address() {
        let resolved = normalizer().resolve(None, None, None, "12 Main St, Kingsford NSW 2032");
        assert_eq!(
            resolved,
            ResolvedAddress {
                suburb: Some("Kingsford".into()),
                state: Some("NSW".into()),
                postcode: Some("2032".into()),
            }
        );
    }

    #[test]
    fn structured_fields_win_over_the_address_line() {
        let resolved = normalizer().resolve(
            Some("MAROUBRA"),
            Some("nsw"),
            Some("2035"),
            "1 Anzac Pde, Kingsford NSW 2032",
        );
        assert_eq!(resolved.suburb.as_deref(), Some("Maroubra"));
        assert_eq!(resolved.state.as_deref(), Some("NSW"));
        assert_eq!(resolved.postcode.as_deref(), Some("2035"));
    }

    #[test]
    fn blank_structured_fields_are_treated_as_missing() {
        let resolved =
            normalizer().resolve(Some("  "), None, Some(""), "12 Main St, Kingsford NSW 2032");
        assert_eq!(resolved.suburb.as_deref(), Some("Kingsford"));
        assert_eq!(resolved.postcode.as_deref(), Some("2032"));
    }

    #[test]
    fn handles_addresses_without_commas() {
        let resolved = normalizer().resolve(None, None, None, "12 Main St Kingsford NSW 2032");
        assert_eq!(resolved.suburb.as_deref(), Some("Kingsford"));
        assert_eq!(resolved.state.as_deref(), Some("NSW"));
        assert_eq!(resolved.postcode.as_deref(), Some("2032"));
    }

    #[test]
    fn keeps_multi_word_suburbs_together() {
        let resolved =
            normalizer().resolve(None, None, None, "5 George Street, North Sydney NSW 2060");
        assert_eq!(resolved.suburb.as_deref(), Some("North Sydney"));
    }

    #[test]
    fn recovers_state_without_a_postcode() {
        let resolved = normalizer().resolve(None, None, None, "Shop 2, Wagga Wagga NSW");
        assert_eq!(resolved.suburb.as_deref(), Some("Wagga Wagga"));
        assert_eq!(resolved.state.as_deref(), Some("NSW"));
        assert_eq!(resolved.postcode, None);
    }

    #[test]
    fn unextractable_addresses_resolve_to_nothing() {
        assert_eq!(
            normalizer().resolve(None, None, None, ""),
            ResolvedAddress::default()
        );
        assert_eq!(
            normalizer().resolve(None, None, None, "12345 67890"),
            ResolvedAddress::default()
        );
    }
}
