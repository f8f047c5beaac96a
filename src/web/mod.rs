//! Web server module
//!
//! Provides the HTML front-end and the JSON API for WikiSearch-RS.

mod handlers;
mod routes;
mod state;
mod templates;
mod view;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
pub use view::PageState;
