use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok, block_on};
use tourdesk_backend::auth::{Permission, Role, TokenService};
use tourdesk_backend::database::MemoryDocumentStore;
use tourdesk_backend::models::*;
use tourdesk_backend::repositories::CustomTourRequestRepository;
use tourdesk_backend::services::ApprovalKind;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Unit tests for pricing
#[test]
fn test_client_final_price_is_ignored() {
    let mut trip: Trip = serde_json::from_value(json!({
        "title": "Sunset Sailing",
        "destination": "Santorini",
        "duration_days": 1,
        "pricing": {"price": "250", "discount_percent": "20", "final_price": "1", "currency": "usd"}
    }))
    .unwrap();

    trip.normalize();
    assert!(trip.validate().is_ok());
    assert_eq!(trip.pricing.final_price, dec("200.00"));
    assert_eq!(trip.pricing.currency, "USD");
}

#[test]
fn test_discount_out_of_range_rejected() {
    let mut hotel: Hotel = serde_json::from_value(json!({
        "name": "Overpriced",
        "destination": "Mykonos",
        "pricing": {"price": "100", "discount_percent": "120"}
    }))
    .unwrap();

    hotel.normalize();
    assert!(hotel.validate().is_err());
}

/// Unit tests for the role table
#[test]
fn test_role_table() {
    assert_eq!(Role::SuperAdmin.permissions().len(), Permission::ALL.len());
    assert_eq!(Role::Admin.permissions().len(), Permission::ALL.len() - 1);

    let editor: Vec<&str> = Role::Editor.permissions().iter().map(|p| p.as_str()).collect();
    assert_eq!(
        editor,
        vec![
            "dashboard:view",
            "destinations:manage",
            "trips:manage",
            "hotels:manage",
            "transfers:manage",
            "activities:manage",
            "blogs:manage",
            "reviews:moderate",
        ]
    );

    let sales: Vec<&str> = Role::Sales.permissions().iter().map(|p| p.as_str()).collect();
    assert_eq!(
        sales,
        vec![
            "dashboard:view",
            "leads:manage",
            "custom_requests:manage",
            "collaborators:manage",
            "distribution:manage",
        ]
    );
}

#[test]
fn test_approval_kinds_cover_every_listing() {
    let collections: Vec<_> = ApprovalKind::ALL.iter().map(|k| k.collection()).collect();
    for kind in [ListingKind::Hotel, ListingKind::Transfer, ListingKind::Trip, ListingKind::Activity] {
        assert!(collections.contains(&kind.collection()));
    }
}

#[test]
fn test_token_carries_role_permissions() {
    let tokens = TokenService::new("unit-test-secret", 2);
    let id = Uuid::new_v4();
    let token = tokens.issue(id, "sales@tourdesk.test", Role::Sales).unwrap();

    let claims = tokens.verify(&token).unwrap();
    assert_eq!(claims.sub, id);
    assert_eq!(claims.permissions, Role::Sales.permission_names());
    assert_eq!(claims.exp - claims.iat, 2 * 3600);
}

/// Unit tests for workflow defaults
#[test]
fn test_new_records_start_in_initial_state() {
    let mut lead: Lead = serde_json::from_value(json!({
        "name": "Ana",
        "email": "ana@example.com",
        "status": "converted",
        "notes": "smuggled"
    }))
    .unwrap();
    lead.prepare_new();
    assert_eq!(lead.status, RequestStatus::Pending);
    assert_eq!(lead.notes, None);

    let mut review: Review = serde_json::from_value(json!({
        "trip_id": "abc",
        "name": "Bo",
        "rating": 4,
        "comment": "Great",
        "approval": {"status": "approved"}
    }))
    .unwrap();
    review.prepare_new();
    assert_eq!(review.approval.status, ApprovalStatus::PendingApproval);
}

#[test]
fn test_unknown_status_strings_rejected() {
    assert!(RequestStatus::from_str("archived").is_err());
    assert!(ApprovalStatus::from_str("maybe").is_err());
    assert!(serde_json::from_value::<RequestStatus>(json!("archived")).is_err());
    assert_eq!(RequestStatus::from_str("Reviewed").unwrap(), RequestStatus::Reviewed);
}

#[test]
fn test_custom_tour_request_validation() {
    let repo = CustomTourRequestRepository::new(Arc::new(MemoryDocumentStore::new()));

    let request: CustomTourRequest = serde_json::from_value(json!({
        "name": "Dana",
        "email": " Dana@Example.com ",
        "destinations": ["Crete", "  ", "Rhodes"],
        "budget": "4500",
        "start_date": "2026-06-01",
        "status": "converted"
    }))
    .unwrap();
    let record = assert_ok!(block_on(repo.create(request)));
    assert_eq!(record.data.email, "dana@example.com");
    assert_eq!(record.data.destinations, vec!["Crete", "Rhodes"]);
    assert_eq!(record.data.travellers, 1);
    assert_eq!(record.data.status, RequestStatus::Pending);

    let no_destinations: CustomTourRequest = serde_json::from_value(json!({
        "name": "Eli",
        "email": "eli@example.com",
        "destinations": []
    }))
    .unwrap();
    assert_err!(block_on(repo.create(no_destinations)));
}
