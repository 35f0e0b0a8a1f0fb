//! Command implementations.
//!
//! - [`run`] - run the smoke scenarios
//! - [`list`] - print the scenario catalogue
//! - [`init`] - write an example config file

pub mod init;
pub mod list;
pub mod run;

pub use init::execute as init_execute;
pub use list::execute as list_execute;
pub use run::execute as run_execute;
