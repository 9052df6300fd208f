//! Request middleware for the leadgate API.

pub mod auth;
