//! CLI command implementations

pub mod analyse;
pub mod anonymise;
pub mod init;
pub mod validate;
