//! Core types for Driftwood.
//!
//! This module provides the catalog domain types shared by the storefront
//! and admin binaries.

pub mod product;
pub mod user;

pub use product::{Gender, ParseGenderError, ParseSizeError, Product, ProductsPage, Size};
pub use user::{ADMIN_ROLE, User};
