//! Shared library for the Asteca Segurança progress tracker
//! Contains the configuration layer and the core domain modules used by the CLI

pub mod config;
pub mod core;
