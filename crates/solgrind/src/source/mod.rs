mod attempt;
mod interface;

pub use attempt::*;
pub use interface::*;
