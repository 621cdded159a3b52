// ABOUTME: Typed client for the Evory Drive backend REST API

#![allow(dead_code)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{PortalBackend, PortalClient};
pub use error::ApiError;
pub use types::{
    ApiEnvelope, ClientSummary, CompanyDetail, CompanyMetrics, CompanyRef, CompanySearchResult,
    LastTrip, ReportKind, ReportRequest,
};
