//! Basket cart library.
//!
//! A client-side shopping cart: one authoritative [`CartStore`] per page
//! session, written through to a durable [`StorageArea`] on every change,
//! with renderer adapters notified synchronously after each mutation.
//!
//! Products enter the cart only after a [`Catalog`] lookup. Separate
//! sessions sharing one storage area see each other's writes when they
//! [`reload`](CartStore::reload).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod page;
pub mod storage;
pub mod store;
pub mod views;

pub use catalog::{Catalog, CatalogError, HttpCatalog, StaticCatalog, add_from_catalog};
pub use config::{CartConfig, CatalogSource, ConfigError};
pub use error::{CartError, Result};
pub use events::{CartChange, CartEvent, CartObserver, CartSnapshot, Notice, SubscriptionId};
pub use page::{CartPage, CheckoutSummary};
pub use storage::{FileStorage, MemoryStorage, StorageArea, StorageError};
pub use store::{CartCommand, CartStore};
pub use views::BadgeMode;
