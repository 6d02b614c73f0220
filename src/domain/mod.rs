pub mod auth;
pub mod status;
pub mod user;

pub use status::{status_color, StatusPalette};
pub use user::{Role, UserRecord};
