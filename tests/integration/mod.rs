//! Integration tests for hierarchy reconstruction

mod cli_contracts;
mod hierarchy_properties;
mod reconstruction;
mod support;
