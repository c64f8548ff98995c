pub mod outcome;
pub mod types;

pub use outcome::*;
pub use types::*;
