pub mod base;
pub mod http;
pub mod logging;

pub use base::*;
pub use http::*;
pub use logging::*;
