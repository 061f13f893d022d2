//! # txextract-registry
//!
//! Lookup tables the extractor consults at runtime.
//!
//! - **`MemoryRegistry`**: selector → method description, loaded from JSON ABI
//!   files. Implements `MethodResolver` from `txextract-core`.
//! - **`StaticDelegates`**: protocol → delegate map built from configuration.
//!   Implements `DelegateResolver`.

pub mod delegates;
pub mod memory;

pub use delegates::StaticDelegates;
pub use memory::MemoryRegistry;
