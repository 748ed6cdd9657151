pub mod accessors;
pub mod auth;
pub mod error;
pub mod gateway;
pub mod insights;

pub use accessors::*;
pub use auth::*;
pub use error::*;
pub use gateway::*;
pub use insights::*;
