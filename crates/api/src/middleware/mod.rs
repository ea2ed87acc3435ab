//! Request middleware.

pub mod auth;
pub mod permission;
pub mod rate_limit;

pub use auth::{AuthUser, auth_middleware};
pub use permission::{PermissionGuard, require_permission};
pub use rate_limit::{
    ClientRateLimit, IpRateLimiter, create_ip_rate_limiter, ip_rate_limit_middleware,
    spawn_sweeper,
};
