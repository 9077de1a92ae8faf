//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across all Driftwood components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal administration panel
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Catalog domain types (products, users)
//! - [`pagination`] - Page/offset derivation for catalog listings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pagination;
pub mod types;

pub use pagination::{DEFAULT_PAGE_SIZE, Paginator};
pub use types::*;
