use super::Candidate;
use crate::utils::format_duration;

/// Shortest candidate accepted, in seconds
pub const MIN_DURATION_SECS: f64 = 20.0;

/// Longest candidate accepted, in seconds
pub const MAX_DURATION_SECS: f64 = 2.0 * 60.0 * 60.0;

/// Per-candidate accept/reject predicate.
///
/// Returns `None` to accept, or the reason the candidate was rejected.
pub trait CandidateFilter: Send + Sync {
    fn check(&self, candidate: &Candidate) -> Option<String>;
}

/// Rejects clips and long streams. Candidates with unknown length pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationPolicy {
    pub min_seconds: f64,
    pub max_seconds: f64,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            min_seconds: MIN_DURATION_SECS,
            max_seconds: MAX_DURATION_SECS,
        }
    }
}

impl CandidateFilter for DurationPolicy {
    fn check(&self, candidate: &Candidate) -> Option<String> {
        let duration = candidate.duration?;

        if duration < self.min_seconds {
            return Some(format!(
                "[error]: Video too short ({}, minimum {})",
                format_duration(duration),
                format_duration(self.min_seconds)
            ));
        }

        if duration > self.max_seconds {
            return Some(format!(
                "[error]: Video too long ({}, maximum {})",
                format_duration(duration),
                format_duration(self.max_seconds)
            ));
        }

        None
    }
}
