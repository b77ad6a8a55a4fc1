//! Mailshot API - typed client for the email-marketing backend
//!
//! `ApiClient` wraps the backend origin, the `Session` and an `HttpClient`
//! transport. Facades group the REST endpoints by resource:
//! `api.clients()`, `api.groups()`, `api.campaigns()`, `api.attachments()`
//! and `api.auth()`.

pub mod attachments;
pub mod auth;
pub mod campaigns;
pub mod client;
pub mod clients;
pub mod error;
pub mod groups;
pub mod io;
pub mod models;
pub mod session;

pub use client::{ApiClient, Download, AUTH_SCHEME, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
pub use io::{FileUpload, HttpClient, ReqwestHttpClient};
pub use session::Session;
