//! Integration tests for strainer-validator.

mod config;
mod filters;
mod validator;
