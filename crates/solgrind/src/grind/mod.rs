//! The concurrent grind: workers racing to the first matching key.
//!
//! ## Structure
//!
//! - `scheduler` - [`Grinder`], which launches the workers and resolves the
//!   race.
//! - `worker` - [`Worker`], one sequential generate-test loop.

mod scheduler;
mod worker;

pub use scheduler::*;
pub use worker::*;
