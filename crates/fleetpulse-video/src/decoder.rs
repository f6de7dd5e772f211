//! Worker progress protocol decoder.
//!
//! The counting worker reports progress as plain text lines on stdout:
//!
//! ```text
//! Total people moving in: 5
//! Total people moving out: 2
//! ```
//!
//! [`decode_line`] maps one line to at most one cumulative counter value.
//! Decoding is permissive: the marker may appear anywhere in the line,
//! anything after the integer is ignored, and a line matching neither
//! marker is simply not a progress line — never an error. Accumulation
//! into the running job counters is the supervisor's responsibility.

use fleetpulse_entity::video::CounterField;

/// Marker preceding the cumulative boarding count.
const IN_MARKER: &str = "Total people moving in:";
/// Marker preceding the cumulative alighting count.
const OUT_MARKER: &str = "Total people moving out:";

/// One decoded counter extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterUpdate {
    /// Which cumulative counter the line reported.
    pub field: CounterField,
    /// The reported cumulative value.
    pub value: u64,
}

/// Decode a single line of worker stdout.
///
/// Pure and stateless: no context is carried between lines.
pub fn decode_line(line: &str) -> Option<CounterUpdate> {
    if let Some(value) = extract(line, IN_MARKER) {
        return Some(CounterUpdate {
            field: CounterField::TotalIn,
            value,
        });
    }
    if let Some(value) = extract(line, OUT_MARKER) {
        return Some(CounterUpdate {
            field: CounterField::TotalOut,
            value,
        });
    }
    None
}

/// Take the integer immediately following `marker`, if present.
fn extract(line: &str, marker: &str) -> Option<u64> {
    let (_, rest) = line.split_once(marker)?;
    let rest = rest.trim_start();
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    rest[..digits_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_moving_in() {
        let update = decode_line("Total people moving in: 5").unwrap();
        assert_eq!(update.field, CounterField::TotalIn);
        assert_eq!(update.value, 5);
    }

    #[test]
    fn decodes_moving_out() {
        let update = decode_line("Total people moving out: 12").unwrap();
        assert_eq!(update.field, CounterField::TotalOut);
        assert_eq!(update.value, 12);
    }

    #[test]
    fn marker_may_appear_mid_line() {
        let update = decode_line("[frame 300] Total people moving in: 7 (tracked)").unwrap();
        assert_eq!(update.field, CounterField::TotalIn);
        assert_eq!(update.value, 7);
    }

    #[test]
    fn non_progress_lines_are_ignored() {
        assert!(decode_line("").is_none());
        assert!(decode_line("loading model weights...").is_none());
        assert!(decode_line("Processing frame 120/3600").is_none());
    }

    #[test]
    fn missing_or_malformed_number_is_ignored() {
        assert!(decode_line("Total people moving in:").is_none());
        assert!(decode_line("Total people moving in: many").is_none());
        assert!(decode_line("Total people moving out: -3").is_none());
    }

    #[test]
    fn decoder_holds_no_state_between_lines() {
        // The same line always decodes the same way regardless of order.
        let a = decode_line("Total people moving in: 2");
        decode_line("Total people moving out: 9");
        let b = decode_line("Total people moving in: 2");
        assert_eq!(a, b);
    }
}
