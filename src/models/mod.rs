pub mod points;
pub mod proposal;
