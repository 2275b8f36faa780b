pub mod admin;
pub mod messaging;
pub mod profile;
pub mod user;

pub use admin::*;
pub use messaging::*;
pub use profile::*;
pub use user::*;
