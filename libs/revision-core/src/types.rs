//! Core types for the revision tracker.

use serde::{Deserialize, Serialize};

/// Source platform a problem was solved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    LeetCode,
    #[serde(rename = "GFG")]
    Gfg,
}

impl Platform {
    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeetCode => "LeetCode",
            Self::Gfg => "GFG",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LeetCode" => Some(Self::LeetCode),
            "GFG" => Some(Self::Gfg),
            _ => None,
        }
    }
}

/// Problem difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Canonical bucket order for difficulty breakdowns.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Get the difficulty name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// Outcome bucket for a recall attempt, derived from confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecallCategory {
    #[serde(rename = "Spend More Time")]
    SpendMoreTime,
    #[serde(rename = "Needs Revision")]
    NeedsRevision,
    Excellent,
}

impl RecallCategory {
    /// Get the category label as stored and served.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpendMoreTime => "Spend More Time",
            Self::NeedsRevision => "Needs Revision",
            Self::Excellent => "Excellent",
        }
    }

    /// Parse from the stored label.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Spend More Time" => Some(Self::SpendMoreTime),
            "Needs Revision" => Some(Self::NeedsRevision),
            "Excellent" => Some(Self::Excellent),
            _ => None,
        }
    }
}
