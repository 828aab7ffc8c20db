pub mod decimal;
pub mod error;
pub mod grid;
pub mod probability;

pub use decimal::*;
pub use error::*;
pub use grid::*;
pub use probability::*;
