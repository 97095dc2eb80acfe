//! HTTP surface: public storefront under `/api`, back office under `/api/admin`.

pub mod catalog;
pub mod extract;
pub mod health;
pub mod inquiries;
pub mod resources;
pub mod response;
pub mod session;
pub mod workflow;

pub use extract::{JsonBody, ListParams, QueryParams};
pub use resources::AdminResource;
pub use response::{ApiResponse, PageMeta};

use crate::models::*;
use crate::SharedState;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Build the application router
pub fn router(state: SharedState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", storefront_routes().nest("/admin", admin_routes()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Credentialed CORS for the configured admin origin, open CORS otherwise
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    match origin.map(|o| o.parse::<HeaderValue>()) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
            .max_age(Duration::from_secs(60 * 60)),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ORIGIN: {}", e);
            open_cors()
        }
        None => open_cors(),
    }
}

fn open_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn storefront_routes() -> Router<SharedState> {
    Router::new()
        .route("/destinations", get(catalog::list_destinations))
        .route("/destinations/:slug", get(catalog::get_destination))
        .route("/trips", get(catalog::list_trips))
        .route("/trips/:slug", get(catalog::get_trip))
        .route("/trips/:slug/reviews", get(catalog::list_trip_reviews))
        .route("/hotels", get(catalog::list_approved::<Hotel>))
        .route("/hotels/:id", get(catalog::get_approved::<Hotel>))
        .route("/transfers", get(catalog::list_approved::<Transfer>))
        .route("/transfers/:id", get(catalog::get_approved::<Transfer>))
        .route("/activities", get(catalog::list_approved::<Activity>))
        .route("/activities/:id", get(catalog::get_approved::<Activity>))
        .route("/blogs", get(catalog::list_blogs))
        .route("/blogs/:slug", get(catalog::get_blog))
        .route("/leads", post(inquiries::create_lead))
        .route("/custom-tours", post(inquiries::create_custom_tour))
        .route("/reviews", post(inquiries::create_review))
}

/// list, get, create, update and delete
fn crud<T: AdminResource>(router: Router<SharedState>, path: &str) -> Router<SharedState> {
    router
        .route(path, get(resources::list::<T>).post(resources::create::<T>))
        .route(
            &format!("{}/:id", path),
            get(resources::get::<T>)
                .put(resources::update::<T>)
                .patch(resources::update::<T>)
                .delete(resources::delete::<T>),
        )
}

/// list, get and delete for records created by the storefront
fn inbox<T: AdminResource>(router: Router<SharedState>, path: &str) -> Router<SharedState> {
    router
        .route(path, get(resources::list::<T>))
        .route(
            &format!("{}/:id", path),
            get(resources::get::<T>).delete(resources::delete::<T>),
        )
}

fn publication<T: Publishable + AdminResource>(
    router: Router<SharedState>,
    path: &str,
) -> Router<SharedState> {
    router
        .route(&format!("{}/:id/publish", path), post(workflow::publish::<T>))
        .route(&format!("{}/:id/unpublish", path), post(workflow::unpublish::<T>))
}

fn admin_routes() -> Router<SharedState> {
    let mut router = Router::new()
        .route("/auth/login", post(session::login))
        .route("/auth/logout", post(session::logout))
        .route("/auth/me", get(session::me))
        .route("/dashboard", get(workflow::dashboard))
        .route("/users", get(session::list_users).post(session::create_user))
        .route(
            "/users/:id",
            get(session::get_user)
                .put(session::update_user)
                .patch(session::update_user)
                .delete(session::delete_user),
        )
        .route("/approvals/pending", get(workflow::pending))
        .route("/approvals/:kind/:id/approve", post(workflow::approve))
        .route("/approvals/:kind/:id/reject", post(workflow::reject))
        .route("/leads/:id/status", patch(workflow::update_status::<Lead>))
        .route(
            "/custom-requests/:id/status",
            patch(workflow::update_status::<CustomTourRequest>),
        );

    router = crud::<Destination>(router, "/destinations");
    router = crud::<Trip>(router, "/trips");
    router = crud::<Hotel>(router, "/hotels");
    router = crud::<Transfer>(router, "/transfers");
    router = crud::<Activity>(router, "/activities");
    router = crud::<BlogPost>(router, "/blogs");
    router = crud::<Collaborator>(router, "/collaborators");
    router = crud::<DistributionListing>(router, "/distribution");

    router = inbox::<Review>(router, "/reviews");
    router = inbox::<Lead>(router, "/leads");
    router = inbox::<CustomTourRequest>(router, "/custom-requests");

    router = publication::<Destination>(router, "/destinations");
    router = publication::<Trip>(router, "/trips");
    publication::<BlogPost>(router, "/blogs")
}
