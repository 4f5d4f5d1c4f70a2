use axum::Router;

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod orders;
pub mod products;
pub mod vendors;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/vendors", vendors::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}
