//! Stockroom CLI library.
//!
//! This crate provides the command-line front end over the inventory
//! manager: argument parsing, configuration lookup and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
