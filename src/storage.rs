//! Session storage mirroring support.
//!
//! Select controls in session-storage mode do not only persist their choice
//! as a cookie; they also load the decoded payload into a `sessionStorage`
//! area so the page under development can pick it up on the next load. This
//! module defines the storage seam for that mirror target plus an in-memory
//! backend.
//!
//! # Available types
//!
//! - [`StorageArea`] — Trait for any storage backend.
//! - [`SessionStorageHandle`] — Shared handle to a storage area.
//! - [`InMemorySessionStorage`] — In-memory backend (tests, headless runs).
//!
//! An embedder bridging to a real browser implements [`StorageArea`] on top
//! of the page's `sessionStorage` object and hands the handle to
//! [`OverlayServices`](crate::overlay::OverlayServices).

/// Storage area module, defining the key/value storage interface.
pub mod area;
/// In-memory session storage implementation.
pub mod in_memory;

pub use area::{SessionStorageHandle, StorageArea};
pub use in_memory::InMemorySessionStorage;
