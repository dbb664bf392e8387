//! URL Guard
//!
//! ML-powered malicious URL detection service.
//!
//! # Architecture
//!
//! ```text
//! POST /predict { "url": ... }
//!        │
//!  ┌─────▼─────────┐    ┌────────────────────┐    ┌──────────────────┐
//!  │ JSON request  │───▶│ Feature Extraction │───▶│  Random Forest   │
//!  │  validation   │    │  (11 URL features) │    │  (majority vote) │
//!  └───────────────┘    └────────────────────┘    └────────┬─────────┘
//!                                                          │
//!                       { "url", "prediction", "message" } ◀
//! ```
//!
//! The forest artifact is trained offline and loaded once at startup; the
//! service itself is stateless per request.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod api;
pub mod config;
pub mod features;
pub mod inference;
pub mod model;

use thiserror::Error;

pub use api::{build_router, AppState};
pub use config::ServiceConfig;
pub use features::UrlFeatures;
pub use inference::{InferenceStats, PredictionService, UrlVerdict};
pub use model::{ForestClassifier, ModelArtifact, UrlClassifier, Verdict};

/// Service error types
#[derive(Debug, Error)]
pub enum UrlGuardError {
    /// Artifact loading or schema problems.
    #[error("model error: {0}")]
    Model(String),
    /// Classifier invocation failures.
    #[error("inference error: {0}")]
    Inference(String),
}
