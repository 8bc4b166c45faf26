pub mod error;
pub mod health;
pub mod root;
pub mod subjects;
pub mod tasks;

pub use error::AppError;
