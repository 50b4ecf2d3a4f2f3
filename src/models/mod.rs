pub mod recipe;
pub mod search;

pub use recipe::*;
pub use search::*;
