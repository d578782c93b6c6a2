pub mod auth;
pub mod edge;
pub mod response;

pub use auth::{authenticate, CurrentUser};
pub use edge::edge_filter;
pub use response::{Ack, ApiResponse, ApiResult};
