pub mod error;
pub mod types;

pub use error::{DmError, DmResult};
pub use types::*;
