//! Command implementations that act on the filesystem rather than on issues.

pub mod init;
