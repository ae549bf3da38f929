pub mod handlers;
pub mod layout;

pub use handlers::*;
