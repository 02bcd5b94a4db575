pub mod types;
pub mod tally;
pub mod queries;

pub use types::*;
pub use tally::*;
pub use queries::*;
