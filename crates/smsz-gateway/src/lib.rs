//! Client side of the remote compression gateway.
//!
//! [`Gateway`] is the seam the session controller depends on. [`HttpGateway`]
//! speaks the HTTP/JSON protocol; [`MemoryGateway`] answers in-process.

pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use traits::Gateway;
