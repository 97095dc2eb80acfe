//! Back-office authentication and role-based access control.

pub mod guard;
pub mod password;
pub mod permissions;
pub mod token;

pub use guard::{AdminSession, AUTH_COOKIE};
pub use password::{hash_password, verify_password};
pub use permissions::{Permission, Role};
pub use token::{Claims, TokenService};
