//! Command implementations.

pub mod init;
pub mod run;

pub use self::init::execute_init;
pub use self::run::execute_run;
