//! Patient identifier normalization.
//!
//! Clinical tables carry identifiers as `G-3686` while the sequencing sources
//! use the compact `G3686` form. Normalization splits the alphabetic prefix
//! from the numeric part so both sources share one key space.

use tracing::warn;

/// Separator inserted between the prefix and the numeric part of an identifier.
pub const ID_SEPARATOR: char = '-';

/// Normalizes a patient identifier by inserting [`ID_SEPARATOR`] before its first digit.
///
/// Identifiers without any digit are returned unchanged and reported as malformed.
pub fn normalize_patient_id(raw: &str) -> String {
    match raw.char_indices().find(|(_, ch)| ch.is_ascii_digit()) {
        Some((pos, _)) => {
            let mut normalized = String::with_capacity(raw.len() + 1);
            normalized.push_str(&raw[..pos]);
            normalized.push(ID_SEPARATOR);
            normalized.push_str(&raw[pos..]);
            normalized
        }
        None => {
            warn!(patient_id = %raw, "patient ID is malformed");
            raw.to_string()
        }
    }
}
