// ABOUTME: Domain models for the registration payloads sent to the backend

#![allow(dead_code)]

pub mod client;
pub mod driver;

pub use client::ClientRegistration;
pub use driver::{DocumentKind, DriverRegistration};
