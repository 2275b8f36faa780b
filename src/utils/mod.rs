// Utility functions
pub mod cursor;
pub mod error;
pub mod routes;

pub use cursor::*;
pub use error::*;
pub use routes::*;
