//! Citizen reports, their status machine, and the append-only timeline.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    Report, ReportCondition, ReportId, ReportStatus, ReportSubmission, StatusChange,
    TimelineEntry, TimelineEntryId, TimelineNote, REPORT_CREATED_ACTIVITY,
};
pub use router::report_router;
pub use service::ReportLifecycleManager;
