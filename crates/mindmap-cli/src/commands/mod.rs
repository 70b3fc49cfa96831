//! Command implementations.

pub mod init_config;
pub mod process;

pub use init_config::execute_init_config;
pub use process::execute_process;
