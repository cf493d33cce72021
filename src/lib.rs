pub mod bridge;
pub mod config;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod notify;
pub mod observability;
pub mod routes;
pub mod server;
pub mod template;

pub use config::Config;
pub use routes::AppState;
pub use server::router;
