//! Where finished sitemap documents go.
//!
//! The engine renders and compresses payloads, then hands the bytes to a
//! [`Storage`]. The same trait answers whether a stylesheet exists under the
//! public directory.
//!
//! - [`FsStorage`] writes to the local filesystem, creating parent directories.
//! - [`MockStorage`] records writes in memory (behind the `mock` feature).
//!
//! ```ignore
//! use std::path::Path;
//! use sitemap_storage::{FsStorage, Storage};
//!
//! FsStorage::new().write(Path::new("public/sitemap.xml"), b"<urlset/>")?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
