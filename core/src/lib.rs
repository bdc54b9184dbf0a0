//! Core library for the zakupy shopping list.
//!
//! Holds the in-memory stores (categories, recipes, shops), the change-event
//! channel, and the document persistence layer. Frontends (the CLI here, a
//! mobile shell elsewhere) implement the collaborator traits in [`service`]
//! and drive everything through [`service::ShoppingService`].

pub mod events;
pub mod models;
pub mod persist;
pub mod service;
pub mod store;
