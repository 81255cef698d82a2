//! Mapping from alert reasons to status light commands.

use std::fmt;

pub const OK_STATUS_COLOR: &str = "00FF00";
pub const ERROR_STATUS_COLOR: &str = "FF0000";
pub const IN_PROGRESS_STATUS_COLOR: &str = "FFA500";

/// Seconds the light takes to fade to a steady color.
pub const SET_DELAY: u32 = 2;
/// Number of blinks for a blinking status.
pub const BLINK_REPEAT: u32 = 10;

/// Status shown on the indicator light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorStatus {
    Ready,
    Error,
    InProgress,
}

/// Alert reasons that drive the light. Matching is case-sensitive; any reason
/// not listed here is accepted and ignored.
pub const REASON_TABLE: &[(&str, IndicatorStatus)] = &[
    ("ReconciliationSucceeded", IndicatorStatus::Ready),
    ("ReconciliationFailed", IndicatorStatus::Error),
    ("BuildFailed", IndicatorStatus::Error),
    ("Progressing", IndicatorStatus::InProgress),
];

impl IndicatorStatus {
    pub fn from_reason(reason: &str) -> Option<Self> {
        REASON_TABLE
            .iter()
            .find(|(known, _)| *known == reason)
            .map(|(_, status)| *status)
    }

    /// RGB hex color, without a leading `#`.
    pub fn color(self) -> &'static str {
        match self {
            IndicatorStatus::Ready => OK_STATUS_COLOR,
            IndicatorStatus::Error => ERROR_STATUS_COLOR,
            IndicatorStatus::InProgress => IN_PROGRESS_STATUS_COLOR,
        }
    }

    pub fn blinks(self) -> bool {
        !matches!(self, IndicatorStatus::Ready)
    }

    pub fn name(self) -> &'static str {
        match self {
            IndicatorStatus::Ready => "READY",
            IndicatorStatus::Error => "ERROR",
            IndicatorStatus::InProgress => "IN_PROGRESS",
        }
    }
}

impl fmt::Display for IndicatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single call to the blink(1) server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorCommand {
    /// `GET /set?color=..&delay=..`
    Set { color: &'static str, delay: u32 },
    /// `GET /blink?color=..&repeat=..`
    Blink { color: &'static str, repeat: u32 },
}

impl IndicatorCommand {
    pub fn for_status(status: IndicatorStatus) -> Self {
        if status.blinks() {
            IndicatorCommand::Blink {
                color: status.color(),
                repeat: BLINK_REPEAT,
            }
        } else {
            IndicatorCommand::Set {
                color: status.color(),
                delay: SET_DELAY,
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            IndicatorCommand::Set { .. } => "/set",
            IndicatorCommand::Blink { .. } => "/blink",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            IndicatorCommand::Set { color, .. } | IndicatorCommand::Blink { color, .. } => color,
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            IndicatorCommand::Set { color, delay } => {
                vec![("color", color.to_string()), ("delay", delay.to_string())]
            }
            IndicatorCommand::Blink { color, repeat } => {
                vec![("color", color.to_string()), ("repeat", repeat.to_string())]
            }
        }
    }
}
