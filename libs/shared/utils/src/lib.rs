pub mod scope;
pub mod test_utils;

pub use scope::{Outcome, ViewScope};
