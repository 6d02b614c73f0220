//! Schedule status values and their display colors.

use serde::Serialize;

/// Color used for any status string that is not recognised.
pub const DEFAULT_STATUS_COLOR: &str = "gray";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Pending,
    Delayed,
}

impl ScheduleStatus {
    pub const ALL: [ScheduleStatus; 6] = [
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Pending,
        Self::Delayed,
    ];

    /// Case-insensitive; `-` and spaces are treated as `_`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "scheduled" => Some(Self::Scheduled),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "pending" => Some(Self::Pending),
            "delayed" => Some(Self::Delayed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Pending => "pending",
            Self::Delayed => "delayed",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Scheduled => "blue",
            Self::InProgress => "yellow",
            Self::Completed => "green",
            Self::Cancelled => "red",
            Self::Pending => "orange",
            Self::Delayed => "purple",
        }
    }
}

/// Map any status string to a color, falling back to [`DEFAULT_STATUS_COLOR`].
pub fn status_color(status: &str) -> &'static str {
    ScheduleStatus::parse(status).map_or(DEFAULT_STATUS_COLOR, ScheduleStatus::color)
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusColor {
    pub status: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusPalette {
    pub colors: Vec<StatusColor>,
    pub default: &'static str,
}

impl StatusPalette {
    pub fn build() -> Self {
        Self {
            colors: ScheduleStatus::ALL
                .iter()
                .map(|s| StatusColor {
                    status: s.as_str(),
                    color: s.color(),
                })
                .collect(),
            default: DEFAULT_STATUS_COLOR,
        }
    }
}
