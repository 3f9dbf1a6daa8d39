//! Visitor pass registration client.
//!
//! An operator signs in against the registration backend, gets a bearer token
//! held in memory, then searches and registers visitors with it. The
//! [`App`] controller ties the pieces together:
//!
//! - [`features::auth`]: session store and sign-in gateway
//! - [`features::visitors`]: result set, query, and draft for the visitors view
//! - [`views`]: surface selection and plain-text rendering
//! - [`client`]: HTTP plumbing, configuration, and errors

pub mod app;
pub mod cli;
pub mod client;
pub mod features;
pub mod views;

pub use app::App;
