//! Request handlers — one module per resource.

pub mod cats;
pub mod health;
