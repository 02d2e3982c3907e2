use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use super::adoptions::{adoption_router, AdoptionRequestManager};
use super::catalog::{catalog_router, CatalogService};
use super::donations::{donation_router, DonationVerificationManager};
use super::notifications::{notification_router, NotificationDispatcher, NotificationRepository};
use super::policy::TransitionPolicy;
use super::reports::{report_router, ReportLifecycleManager};
use super::store::{InMemoryRescueStore, RescueStore};
use crate::config::WorkflowConfig;

/// Every manager wired against one store and one notification repository.
pub struct RescueServices<S, N> {
    pub catalog: Arc<CatalogService<S>>,
    pub reports: Arc<ReportLifecycleManager<S, N>>,
    pub donations: Arc<DonationVerificationManager<S, N>>,
    pub adoptions: Arc<AdoptionRequestManager<S, N>>,
    pub notifications: Arc<NotificationDispatcher<N>>,
    pub poll_interval: Duration,
}

impl<S, N> RescueServices<S, N>
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(store: Arc<S>, notifications: Arc<N>, config: &WorkflowConfig) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(notifications));
        let policy: TransitionPolicy = config.transition_policy;

        Self {
            catalog: Arc::new(CatalogService::new(store.clone())),
            reports: Arc::new(ReportLifecycleManager::new(
                store.clone(),
                dispatcher.clone(),
                policy,
            )),
            donations: Arc::new(DonationVerificationManager::new(
                store.clone(),
                dispatcher.clone(),
            )),
            adoptions: Arc::new(AdoptionRequestManager::new(
                store,
                dispatcher.clone(),
                policy,
            )),
            notifications: dispatcher,
            poll_interval: config.notification_poll_interval,
        }
    }
}

impl RescueServices<InMemoryRescueStore, InMemoryRescueStore> {
    /// Single in-memory store backing both the workflow rows and the notifications.
    pub fn in_memory(config: &WorkflowConfig) -> Self {
        let store = Arc::new(InMemoryRescueStore::new());
        Self::new(store.clone(), store, config)
    }
}

/// Merges the catalog, report, donation, adoption, and notification routers.
pub fn rescue_router<S, N>(services: &RescueServices<S, N>) -> Router
where
    S: RescueStore + 'static,
    N: NotificationRepository + 'static,
{
    catalog_router(services.catalog.clone())
        .merge(report_router(services.reports.clone()))
        .merge(donation_router(services.donations.clone()))
        .merge(adoption_router(services.adoptions.clone()))
        .merge(notification_router(
            services.notifications.clone(),
            services.poll_interval,
        ))
}
