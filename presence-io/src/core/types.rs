//! Readings, presence classification and decoded reports.

use std::fmt;

/// Raw ADC sample as exposed by `in_voltage<C>_raw`
pub type Reading = u32;

/// Label sent when the reading is above the threshold
pub const LABEL_DETECTED: &str = "presenca detectada";

/// Label sent when the reading is at or below the threshold
pub const LABEL_NOT_DETECTED: &str = "sem presenca";

/// Presence inferred from a single reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Detected,
    NotDetected,
}

impl Presence {
    /// Classify a reading: `Detected` iff `value > threshold`
    pub fn classify(value: Reading, threshold: u32) -> Self {
        if value > threshold {
            Presence::Detected
        } else {
            Presence::NotDetected
        }
    }

    /// Wire label for this classification
    pub fn label(self) -> &'static str {
        match self {
            Presence::Detected => LABEL_DETECTED,
            Presence::NotDetected => LABEL_NOT_DETECTED,
        }
    }

    pub fn is_detected(self) -> bool {
        matches!(self, Presence::Detected)
    }

    /// Map a wire label back to a classification
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            LABEL_DETECTED => Some(Presence::Detected),
            LABEL_NOT_DETECTED => Some(Presence::NotDetected),
            _ => None,
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Report decoded on the listener side
///
/// `label` is `None` for the two-field `adc,<value>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub value: Reading,
    pub label: Option<String>,
}

impl Report {
    /// Classification carried by the label, if it is one of the known strings
    pub fn presence(&self) -> Option<Presence> {
        self.label.as_deref().and_then(Presence::from_label)
    }
}
