use serde::{Deserialize, Serialize};

/// Canonical trend state assigned to one bar of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Down = -1,   // Confirmed downtrend
    Neutral = 0, // No confirmed trend
    Up = 1,      // Confirmed uptrend
}

impl Label {
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Label::Down),
            0 => Some(Label::Neutral),
            1 => Some(Label::Up),
            _ => None,
        }
    }
}

impl From<Label> for i8 {
    fn from(label: Label) -> i8 {
        label.as_i8()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Down => write!(f, "Down"),
            Label::Neutral => write!(f, "Neutral"),
            Label::Up => write!(f, "Up"),
        }
    }
}
