// CV artifact pipeline and its HTTP handlers.

pub mod handlers;
pub mod service;
