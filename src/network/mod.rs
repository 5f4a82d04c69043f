//! Network Module
//!
//! HTTP boundary over the record store.
//!
//! ## Architecture
//! - axum router on a tokio runtime
//! - Store calls run on the blocking pool (`spawn_blocking`)
//! - Store errors mapped to status codes in one place (`ApiError`)

mod error;
mod handlers;
mod middleware;
mod request;
mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use middleware::RequestLogLayer;
pub use request::EntryBody;
pub use server::{router, Server};
