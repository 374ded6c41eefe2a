//! Runtime models that are not part of the gym domain.

pub mod config;
