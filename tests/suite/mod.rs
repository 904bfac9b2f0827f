//! Integration test suite modules

mod cli;
mod config;
mod dynamic;
mod mapping;
mod messaging;
