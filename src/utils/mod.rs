pub mod error;
pub mod output;

pub use error::{report_error, AppError, AppResult};
pub use output::*;
