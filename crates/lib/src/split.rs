//! # Response Splitting
//!
//! Divides a raw model completion into an explanation and a control action
//! by scanning for the first occurrence of a known section marker.

/// Section markers, in priority order. The first one found wins and no
/// further scanning takes place.
const SOLUTION_MARKERS: &[&str] = &["Solution:", "Решение:", "Control Action:"];

/// Returned as the control action when the completion carries no marker.
pub const NO_SOLUTION_PARSED: &str = "No specific solution parsed.";

/// Returned as the control action when a marker is present but nothing
/// follows it.
pub const NO_SOLUTION_EXTRACTED: &str = "No solution text extracted.";

/// The two segments extracted from one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub explanation: String,
    pub control_action: String,
}

/// Splits a completion on the first matching marker.
pub fn split_completion(raw_text: &str) -> Diagnosis {
    for marker in SOLUTION_MARKERS {
        if let Some(pos) = raw_text.find(marker) {
            let explanation = raw_text[..pos].trim().to_string();
            let solution = raw_text[pos + marker.len()..].trim();
            let control_action = if solution.is_empty() {
                NO_SOLUTION_EXTRACTED.to_string()
            } else {
                solution.to_string()
            };
            return Diagnosis {
                explanation,
                control_action,
            };
        }
    }

    Diagnosis {
        explanation: raw_text.trim().to_string(),
        control_action: NO_SOLUTION_PARSED.to_string(),
    }
}
