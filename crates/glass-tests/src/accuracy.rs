//! Code value comparison between two 8-bit RGB buffers
//!
//! Profile conversions are compared per channel in output code values.
//! Two CMMs rounding differently at one step should never be more than a
//! couple of codes apart.

use serde::Serialize;

/// Statistics from comparing two buffers channel by channel
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeDiffStats {
    /// Largest absolute channel difference
    pub max: u8,
    /// Mean absolute channel difference
    pub mean: f64,
    /// Channels that differ at all
    pub differing: usize,
    /// Channels compared
    pub count: usize,
}

impl CodeDiffStats {
    pub fn is_exact(&self) -> bool {
        self.max == 0
    }

    pub fn within(&self, tolerance: u8) -> bool {
        self.max <= tolerance
    }

    /// One-line JSON, for assertion messages
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Compare two interleaved buffers of equal length
pub fn compare_rgb_buffers(expected: &[u8], actual: &[u8]) -> CodeDiffStats {
    assert_eq!(expected.len(), actual.len(), "buffer lengths differ");

    let mut stats = CodeDiffStats {
        count: expected.len(),
        ..CodeDiffStats::default()
    };
    let mut total = 0u64;
    for (&a, &b) in expected.iter().zip(actual) {
        let diff = a.abs_diff(b);
        if diff > 0 {
            stats.differing += 1;
        }
        stats.max = stats.max.max(diff);
        total += diff as u64;
    }
    if stats.count > 0 {
        stats.mean = total as f64 / stats.count as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        let stats = compare_rgb_buffers(&[1, 2, 3], &[1, 2, 3]);
        assert!(stats.is_exact());
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_differences() {
        let stats = compare_rgb_buffers(&[10, 20, 30, 40], &[12, 20, 29, 40]);
        assert_eq!(stats.max, 2);
        assert_eq!(stats.differing, 2);
        assert!((stats.mean - 0.75).abs() < 1e-9);
        assert!(stats.within(2));
        assert!(!stats.within(1));
    }

    #[test]
    fn test_json_report() {
        let stats = compare_rgb_buffers(&[0], &[255]);
        assert!(stats.to_json().contains("\"max\":255"));
    }
}
