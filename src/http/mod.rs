//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, metrics)
//!     → middleware/ (framework scope, locale redirect)
//!     → server.rs forward handler → upstream renderer
//!     → Send response to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::HttpServer;
