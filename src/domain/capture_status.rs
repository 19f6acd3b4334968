use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    Idle,
    Pending,
    Listening,
    Streaming,
    Error,
}

impl CaptureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureStatus::Idle => "idle",
            CaptureStatus::Pending => "pending",
            CaptureStatus::Listening => "listening",
            CaptureStatus::Streaming => "streaming",
            CaptureStatus::Error => "error",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CaptureStatus::Listening | CaptureStatus::Streaming)
    }
}

impl FromStr for CaptureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(CaptureStatus::Idle),
            "pending" => Ok(CaptureStatus::Pending),
            "listening" => Ok(CaptureStatus::Listening),
            "streaming" => Ok(CaptureStatus::Streaming),
            "error" => Ok(CaptureStatus::Error),
            _ => Err(format!("Invalid capture status: {}", s)),
        }
    }
}

impl fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
