mod environment;
mod error;
mod pretty_json;

pub use environment::Environment;
pub use error::AppError;
pub use pretty_json::PrettyJson;
