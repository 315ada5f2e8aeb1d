use core::fmt::{Display, Formatter};
use serde::Serialize;

/// The value of one metric: a raw count from a provider or a derived ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Ratio(f64),
}

impl MetricValue {
    #[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        match *self {
            Self::Count(count) => count as f64,
            Self::Ratio(ratio) => ratio,
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Ratio(ratio) => write!(f, "{ratio:.6} ({:.4}%)", ratio * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MetricValue::Count(42).to_string(), "42");
        assert_eq!(MetricValue::Ratio(0.025).to_string(), "0.025000 (2.5000%)");
    }

    #[test]
    fn test_serialize_untagged() {
        assert_eq!(serde_json::to_string(&MetricValue::Count(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&MetricValue::Ratio(0.5)).unwrap(), "0.5");
    }
}
