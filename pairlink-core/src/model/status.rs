use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Red,
    Gray,
}

/// User-facing progress line with its indicator color.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct Status {
    pub message: String,
    pub color: StatusColor,
}

impl Status {
    pub fn new(message: impl Into<String>, color: StatusColor) -> Self {
        Self {
            message: message.into(),
            color,
        }
    }

    pub fn green(message: impl Into<String>) -> Self {
        Self::new(message, StatusColor::Green)
    }

    pub fn red(message: impl Into<String>) -> Self {
        Self::new(message, StatusColor::Red)
    }

    pub fn gray(message: impl Into<String>) -> Self {
        Self::new(message, StatusColor::Gray)
    }
}
