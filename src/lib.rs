//! Core library exports for the eGadget store backend.
//!
//! The `data` feature exposes the persistence and domain layers (`domain`,
//! `models`, `schema`, `repository`); the default `server` feature adds the
//! Actix-web application on top (auth, services, routes).

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
