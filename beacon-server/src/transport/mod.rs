mod peer_handle;
mod rate_limit;

pub use peer_handle::{PeerHandle, WsPeerHandle};
pub use rate_limit::{RateLimiter, SlidingWindow};
