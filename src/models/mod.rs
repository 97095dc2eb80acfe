//! Domain models for the Tourdesk backend.
//!
//! Each record type is stored as a JSON document in its own collection and
//! implements [`Document`]. Status blocks and pricing are shared between
//! listing types.

pub mod activity;
pub mod admin_user;
pub mod blog;
pub mod collaborator;
pub mod custom_request;
pub mod destination;
pub mod distribution;
pub mod document;
pub mod hotel;
pub mod lead;
pub mod pricing;
pub mod review;
pub mod status;
pub mod transfer;
pub mod trip;

// Re-export all models for convenient access
pub use activity::Activity;
pub use admin_user::{AdminUser, AdminUserView};
pub use blog::BlogPost;
pub use collaborator::Collaborator;
pub use custom_request::CustomTourRequest;
pub use destination::Destination;
pub use distribution::{DistributionListing, ListingKind};
pub use document::{Document, FollowUp, Listing, Publishable, Record};
pub use hotel::Hotel;
pub use lead::Lead;
pub use pricing::Pricing;
pub use review::Review;
pub use status::{Approval, ApprovalStatus, Publication, PublishStatus, RequestStatus};
pub use transfer::Transfer;
pub use trip::{ItineraryDay, Trip};
