pub mod document_repository;

pub use document_repository::Repository;

use crate::models::*;

// One repository per collection
pub type DestinationRepository = Repository<Destination>;
pub type TripRepository = Repository<Trip>;
pub type HotelRepository = Repository<Hotel>;
pub type TransferRepository = Repository<Transfer>;
pub type ActivityRepository = Repository<Activity>;
pub type BlogRepository = Repository<BlogPost>;
pub type ReviewRepository = Repository<Review>;
pub type LeadRepository = Repository<Lead>;
pub type CustomTourRequestRepository = Repository<CustomTourRequest>;
pub type CollaboratorRepository = Repository<Collaborator>;
pub type DistributionRepository = Repository<DistributionListing>;
pub type AdminUserRepository = Repository<AdminUser>;
