//! Cogito - web tier for the Cogito AI tutor.
//!
//! This crate serves the HTML shell with theme and device preferences
//! negotiated from cookies and client hints, handles the authentication
//! callback, and loads generated learning content from the tutoring backend
//! through a cache-or-fetch loader.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
