pub mod error;
pub mod money;

pub use error::{AppError, Result};
pub use money::PRICE_SCALE;
