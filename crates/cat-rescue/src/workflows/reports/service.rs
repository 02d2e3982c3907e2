use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Report, ReportId, ReportStatus, ReportSubmission, StatusChange, TimelineEntry,
    TimelineEntryId, TimelineNote, REPORT_CREATED_ACTIVITY,
};
use crate::workflows::catalog::UserId;
use crate::workflows::error::WorkflowError;
use crate::workflows::notifications::{
    NotificationDispatcher, NotificationDraft, NotificationKind, NotificationRepository,
};
use crate::workflows::policy::TransitionPolicy;
use crate::workflows::store::RescueStore;

const CREATED_ICON: &str = "assignment";
const NOTE_ICON: &str = "info";

/// Owns the report state machine, its timeline, and the shelter intake counter.
pub struct ReportLifecycleManager<S, N> {
    store: Arc<S>,
    notifications: Arc<NotificationDispatcher<N>>,
    policy: TransitionPolicy,
}

impl<S, N> ReportLifecycleManager<S, N>
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(
        store: Arc<S>,
        notifications: Arc<NotificationDispatcher<N>>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            store,
            notifications,
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Files a report, opens its timeline, and reserves one unit of shelter occupancy.
    ///
    /// Capacity is not enforced here; an over-capacity intake is logged as an alert.
    pub fn create_report(&self, submission: ReportSubmission) -> Result<Report, WorkflowError> {
        if submission.user_id.is_blank() {
            return Err(WorkflowError::Validation(
                "reporter id must not be empty".to_string(),
            ));
        }
        if submission.image_ref.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "a photo reference is required".to_string(),
            ));
        }

        let (report, shelter) = self.store.transaction(|state| -> Result<_, WorkflowError> {
            let shelter = state.shelter_mut(&submission.shelter_id)?;
            shelter.current_occupancy =
                shelter.current_occupancy.checked_add(1).ok_or_else(|| {
                    WorkflowError::InvalidState(format!(
                        "shelter {} occupancy counter is at its maximum",
                        shelter.id.0
                    ))
                })?;
            let shelter = shelter.clone();

            let report_id = ReportId(state.next_id("rpt"));
            let entry_id = TimelineEntryId(state.next_id("tl"));
            let now = Utc::now();
            let report = Report {
                id: report_id,
                user_id: submission.user_id,
                shelter_id: submission.shelter_id,
                condition: submission.condition,
                status: ReportStatus::Pending,
                image_ref: submission.image_ref,
                description: submission.description,
                created_at: now,
                timeline: vec![TimelineEntry {
                    id: entry_id,
                    activity: REPORT_CREATED_ACTIVITY.to_string(),
                    description: Some(format!("Laporan diterima oleh {}", shelter.name)),
                    icon: Some(CREATED_ICON.to_string()),
                    created_at: now,
                }],
            };
            state.reports.insert(report.id.clone(), report.clone());
            Ok((report, shelter))
        })?;

        info!(
            report_id = %report.id.0,
            shelter_id = %shelter.id.0,
            occupancy = shelter.current_occupancy,
            "report created"
        );
        if shelter.is_over_capacity() {
            warn!(
                shelter_id = %shelter.id.0,
                occupancy = shelter.current_occupancy,
                capacity = shelter.capacity,
                "shelter intake exceeds administrative capacity"
            );
        }

        self.notifications.notify_best_effort(NotificationDraft::new(
            report.user_id.clone(),
            NotificationKind::Report,
            REPORT_CREATED_ACTIVITY,
            format!(
                "Laporan {} telah diterima oleh {}.",
                report.id.0, shelter.name
            ),
        ));

        Ok(report)
    }

    /// Moves a report to `change.status`, recording the transition on the timeline.
    pub fn advance_status(
        &self,
        report_id: &ReportId,
        change: StatusChange,
    ) -> Result<Report, WorkflowError> {
        let StatusChange {
            status,
            activity,
            description,
        } = change;
        let activity = non_blank(activity).unwrap_or_else(|| status.default_activity().to_string());
        let description = non_blank(description);

        let (previous, report) = self.store.transaction(|state| -> Result<_, WorkflowError> {
            let entry_id = TimelineEntryId(state.next_id("tl"));
            let report = state.report_mut(report_id)?;
            self.policy.check("report", report.status, status)?;

            let previous = report.status;
            report.status = status;
            report.timeline.push(TimelineEntry {
                id: entry_id,
                activity: activity.clone(),
                description: description.clone(),
                icon: Some(status.icon().to_string()),
                created_at: Utc::now(),
            });
            Ok((previous, report.clone()))
        })?;

        info!(
            report_id = %report.id.0,
            from = previous.label(),
            to = report.status.label(),
            "report status changed"
        );

        let message = match &description {
            Some(detail) => format!("{activity}: {detail}"),
            None => format!("Status laporan {} kini {}.", report.id.0, status.label()),
        };
        self.notifications.notify_best_effort(NotificationDraft::new(
            report.user_id.clone(),
            NotificationKind::Report,
            activity,
            message,
        ));

        Ok(report)
    }

    /// Adds an operational note to the timeline. The status is left untouched.
    pub fn append_timeline_entry(
        &self,
        report_id: &ReportId,
        note: TimelineNote,
    ) -> Result<TimelineEntry, WorkflowError> {
        let activity = note.activity.trim().to_string();
        if activity.is_empty() {
            return Err(WorkflowError::Validation(
                "timeline activity must not be empty".to_string(),
            ));
        }
        let description = non_blank(note.description);
        let icon = non_blank(note.icon).unwrap_or_else(|| NOTE_ICON.to_string());

        let (owner, entry) = self.store.transaction(|state| -> Result<_, WorkflowError> {
            let entry_id = TimelineEntryId(state.next_id("tl"));
            let report = state.report_mut(report_id)?;
            let entry = TimelineEntry {
                id: entry_id,
                activity,
                description,
                icon: Some(icon),
                created_at: Utc::now(),
            };
            report.timeline.push(entry.clone());
            Ok((report.user_id.clone(), entry))
        })?;

        info!(report_id = %report_id.0, entry_id = %entry.id.0, "timeline entry appended");

        let message = entry
            .description
            .clone()
            .unwrap_or_else(|| format!("Pembaruan baru pada laporan {}.", report_id.0));
        self.notifications.notify_best_effort(NotificationDraft::new(
            owner,
            NotificationKind::Report,
            entry.activity.clone(),
            message,
        ));

        Ok(entry)
    }

    /// Report with its timeline in storage (chronological) order.
    pub fn get(&self, report_id: &ReportId) -> Result<Report, WorkflowError> {
        self.store
            .read(|state| state.report(report_id).cloned())?
            .ok_or_else(|| WorkflowError::not_found("report", report_id.0.clone()))
    }

    /// Timeline for display, newest first.
    pub fn timeline(&self, report_id: &ReportId) -> Result<Vec<TimelineEntry>, WorkflowError> {
        Ok(self.get(report_id)?.timeline_newest_first())
    }

    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Report>, WorkflowError> {
        let mut reports: Vec<Report> = self.store.read(|state| {
            state
                .reports
                .values()
                .filter(|report| &report.user_id == user_id)
                .cloned()
                .collect()
        })?;
        reports.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(reports)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
