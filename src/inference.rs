//! Prediction Service
//!
//! Composes feature extraction and classifier inference into the one
//! operation the API exposes, and tracks inference statistics.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::Serialize;

use crate::features::UrlFeatures;
use crate::model::{UrlClassifier, Verdict};
use crate::UrlGuardError;

/// Outcome of classifying a single URL.
#[derive(Debug, Clone)]
pub struct UrlVerdict {
    /// Features the verdict was computed from.
    pub features: UrlFeatures,
    /// Binary verdict.
    pub verdict: Verdict,
}

/// Request-facing classification service.
///
/// Holds the loaded classifier as immutable shared state for the life of
/// the process; every request is an independent, stateless computation.
pub struct PredictionService {
    classifier: Arc<dyn UrlClassifier>,
    stats: RwLock<InferenceStats>,
}

impl PredictionService {
    /// Create a service around a loaded classifier.
    pub fn new(classifier: Arc<dyn UrlClassifier>) -> Self {
        Self {
            classifier,
            stats: RwLock::new(InferenceStats::default()),
        }
    }

    /// Classify one URL.
    pub fn classify(&self, url: &str) -> Result<UrlVerdict, UrlGuardError> {
        let start = Instant::now();

        let features = UrlFeatures::from_url(url);
        let verdict = self.classifier.predict(&features)?;

        let elapsed = start.elapsed();
        let mut stats = self.stats.write();
        stats.total_inferences += 1;
        stats.total_latency_us += elapsed.as_micros() as u64;
        match verdict {
            Verdict::Malicious => stats.malicious_verdicts += 1,
            Verdict::Safe => stats.safe_verdicts += 1,
        }

        Ok(UrlVerdict { features, verdict })
    }

    /// Snapshot of inference statistics.
    pub fn stats(&self) -> InferenceStats {
        self.stats.read().clone()
    }
}

/// Inference statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct InferenceStats {
    pub total_inferences: u64,
    pub total_latency_us: u64,
    pub malicious_verdicts: u64,
    pub safe_verdicts: u64,
}

impl InferenceStats {
    /// Average latency in microseconds
    pub fn avg_latency_us(&self) -> f64 {
        if self.total_inferences == 0 {
            0.0
        } else {
            self.total_latency_us as f64 / self.total_inferences as f64
        }
    }
}
