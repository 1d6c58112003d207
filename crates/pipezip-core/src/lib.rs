//! Streaming ZIP packing and unpacking.
//!
//! `pipezip-core` turns filesystem paths into a ZIP archive written to any
//! byte sink, and extracts a ZIP archive read sequentially from any byte
//! source. Neither direction needs the archive to be seekable on the
//! outside, so both work over pipes.
//!
//! # Examples
//!
//! ```no_run
//! use pipezip_core::NoopObserver;
//! use pipezip_core::PackConfig;
//! use pipezip_core::UnpackConfig;
//! use pipezip_core::pack_to_stream;
//! use pipezip_core::unpack;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut archive = Vec::new();
//! let report = pack_to_stream(
//!     &[Path::new("testData")],
//!     &mut archive,
//!     &PackConfig::default(),
//!     &mut NoopObserver,
//! )?;
//! println!("Packed {} entries", report.total_entries());
//!
//! let report = unpack(
//!     archive.as_slice(),
//!     Path::new("out"),
//!     &UnpackConfig::default(),
//!     &mut NoopObserver,
//! );
//! println!("Extracted {} items", report.total_items());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod copy;
pub mod error;
pub mod naming;
pub mod observer;
pub mod pack;
pub mod report;
pub mod unpack;
pub mod walker;

// Re-export main API types
pub use config::DEFAULT_CHUNK_SIZE;
pub use config::PackConfig;
pub use config::UnpackConfig;
pub use error::ArchiveError;
pub use error::Result;
pub use observer::ArchiveObserver;
pub use observer::LogObserver;
pub use observer::NoopObserver;
pub use pack::pack;
pub use pack::pack_to_stream;
pub use report::PackReport;
pub use report::UnpackReport;
pub use unpack::unpack;
pub use walker::FileEntry;
pub use walker::list_entries;
