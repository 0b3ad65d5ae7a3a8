//! Resilient client for the ClipStudio generation API.
//!
//! This crate provides:
//! - Environment profile resolution (base URL, timeouts)
//! - An endpoint registry for the story, image, tts and video APIs
//! - A health gate that fails fast when the backend is down
//! - A single-attempt request executor with typed errors
//! - Feature facades that degrade to mock payloads on read paths

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod environment;
pub mod error;
pub mod health;
pub mod metrics;
pub mod mock;
pub mod services;
pub mod types;

#[cfg(test)]
mod client_tests;

pub use auth::{FileTokenStore, MemoryTokenStore, NoToken, TokenStore};
pub use client::{ApiClient, ApiClientConfig};
pub use endpoints::Domain;
pub use environment::{Environment, EnvironmentProfile};
pub use error::{ApiError, ApiResult, ErrorCause};
pub use health::{HealthPolicy, HealthStatus};
pub use services::{ClipStudio, ImageService, StoryService, TtsService, VideoService};
pub use types::{Method, MultipartBody, RequestBody, RequestDescriptor};
