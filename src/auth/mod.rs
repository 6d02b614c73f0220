pub mod claims;
pub mod context;
pub mod middleware;
pub mod token;

pub use claims::IdentityClaims;
pub use context::AuthContext;
pub use middleware::RequireAuth;
pub use token::{TokenError, TokenService};
