//! Basket Core - Shared cart domain types.
//!
//! This crate provides the types every Basket component agrees on:
//! - `cart` - The cart store, its persistence codec and renderer adapters
//! - `cli` - Command-line driver for a single page session
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere a cart line needs to be described.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, quantities, catalog products and line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
