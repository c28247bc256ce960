//! # Web API Request Handlers

pub mod contacts;
pub mod health;
