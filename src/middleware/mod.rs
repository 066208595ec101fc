mod error_handler;
mod rate_limit;

pub use error_handler::log_requests;
pub use rate_limit::{RateLimiter, rate_limit};
