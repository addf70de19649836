pub mod error_handler;

pub use error_handler::{error_response, json_error_handler, path_error_handler};
