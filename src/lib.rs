pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod region;
pub mod render;
pub mod router;

pub use error::RecordsError;
