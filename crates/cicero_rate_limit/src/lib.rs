//! Per-client request rate limiting for the Cicero assistant backend.
//!
//! Implements the fixed request ceiling on the primary ask endpoint:
//! 100 requests per 15 minutes per client address.

mod error;
mod limiter;

pub use error::{RateLimitError, RateLimitErrorKind};
pub use limiter::{ClientLimiter, RateLimitConfig};
