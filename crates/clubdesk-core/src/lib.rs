pub mod attendance;
pub mod category;
pub mod coerce;
pub mod finance;
pub mod identity;
pub mod ids;
pub mod member;
pub mod payment;
pub mod report;
pub mod training;

pub use attendance::*;
pub use category::*;
pub use finance::*;
pub use identity::*;
pub use ids::*;
pub use member::*;
pub use payment::*;
pub use report::*;
pub use training::*;
