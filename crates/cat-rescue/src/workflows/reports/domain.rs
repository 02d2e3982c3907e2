use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::{ShelterId, UserId};
use crate::workflows::policy::Lifecycle;

pub const REPORT_CREATED_ACTIVITY: &str = "Laporan Dibuat";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineEntryId(pub String);

/// Condition of the cat as observed by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportCondition {
    Sehat,
    Terluka,
    Sakit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Rejected,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Processing => "PROCESSING",
            ReportStatus::Completed => "COMPLETED",
            ReportStatus::Cancelled => "CANCELLED",
            ReportStatus::Rejected => "REJECTED",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ReportStatus::Completed | ReportStatus::Cancelled | ReportStatus::Rejected
        )
    }

    /// Timeline activity used when the caller does not supply one.
    pub const fn default_activity(self) -> &'static str {
        match self {
            ReportStatus::Pending => "Laporan Menunggu",
            ReportStatus::Processing => "Laporan Diproses",
            ReportStatus::Completed => "Laporan Selesai",
            ReportStatus::Cancelled => "Laporan Dibatalkan",
            ReportStatus::Rejected => "Laporan Ditolak",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            ReportStatus::Pending => "schedule",
            ReportStatus::Processing => "sync",
            ReportStatus::Completed => "check_circle",
            ReportStatus::Cancelled => "cancel",
            ReportStatus::Rejected => "block",
        }
    }
}

impl Lifecycle for ReportStatus {
    fn is_terminal(self) -> bool {
        ReportStatus::is_terminal(self)
    }

    fn allows(self, next: Self) -> bool {
        use ReportStatus::*;
        matches!(
            (self, next),
            (Pending, Processing | Rejected | Cancelled)
                | (Processing, Completed | Rejected | Cancelled)
        )
    }

    fn status_label(self) -> &'static str {
        self.label()
    }
}

/// Append-only audit entry attached to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: TimelineEntryId,
    pub activity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A citizen report about a stray or injured cat. The timeline is stored chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub user_id: UserId,
    pub shelter_id: ShelterId,
    pub condition: ReportCondition,
    pub status: ReportStatus,
    pub image_ref: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub timeline: Vec<TimelineEntry>,
}

impl Report {
    pub fn timeline_newest_first(&self) -> Vec<TimelineEntry> {
        self.timeline.iter().rev().cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub user_id: UserId,
    pub shelter_id: ShelterId,
    pub condition: ReportCondition,
    #[serde(default)]
    pub description: String,
    pub image_ref: String,
}

/// Status change requested by shelter staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ReportStatus,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl StatusChange {
    pub fn to(status: ReportStatus) -> Self {
        Self {
            status,
            activity: None,
            description: None,
        }
    }
}

/// Operational note appended to the timeline without touching the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineNote {
    pub activity: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}
