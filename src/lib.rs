pub mod aws;
pub mod browser;
pub mod cli;
pub mod constants;
pub mod deadline;
pub mod error;
pub mod logging;

pub use error::LoginError;
