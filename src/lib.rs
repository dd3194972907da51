//! hgfetch library
//!
//! Downloads a pinned `mercurial-devel` source archive, unpacks it and
//! renames the result to `mercurial-devel`.

pub mod commands;
pub mod core;
pub mod error;
pub mod logging;
pub mod utils;

pub use crate::commands::fetch::fetch;
pub use crate::core::config::FetchConfig;
pub use crate::core::download::{ArchiveSource, CurlSource};
pub use crate::error::{FetchError, Result};
