//! Donations and the campaign totals they feed.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    Campaign, CampaignDraft, CampaignId, CampaignStatus, Donation, DonationId, DonationReview,
    DonationStatus, DonationSubmission, DonationTransition,
};
pub use router::donation_router;
pub use service::DonationVerificationManager;
