//! Project-scoped filesystem abstraction for upmscan.
//!
//! This crate provides a `FileSystem` trait with two backends: a native one
//! (using `std::fs`, confined to a project root) and an in-memory one for
//! embedders that already hold the manifest and cache contents.
//!
//! # Example
//!
//! ```no_run
//! use upmscan_fs::{FileSystem, NativeFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> std::io::Result<()> {
//! let fs = NativeFileSystem::new(".")?;
//! let manifest = fs.read_to_string(Path::new("Packages/manifest.json"))?;
//! println!("{}", manifest);
//! # Ok(())
//! # }
//! ```

mod file_system;
pub use file_system::{DirEntry, FileMetadata, FileSystem};

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "native")]
pub use native::NativeFileSystem;

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "memory")]
pub use memory::MemoryFileSystem;

#[cfg(feature = "native")]
pub use NativeFileSystem as DefaultFileSystem;

#[cfg(all(not(feature = "native"), feature = "memory"))]
pub use MemoryFileSystem as DefaultFileSystem;
