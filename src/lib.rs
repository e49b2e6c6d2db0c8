//! Developer Path: a REST service for curating learning paths
//!
//! A path is an ordered list of modules; modules group themes into sections, and each theme
//! lists the sources that teach it. HTTP controllers in [`server`] build commands and queries
//! from [`application`] and hand them to the [`application::Mediator`].

pub mod application;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;

#[cfg(feature = "server")]
pub mod server;
