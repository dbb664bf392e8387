//! Classifier Loading and Inference
//!
//! The trained random forest is an opaque artifact produced offline; this
//! module restores it from disk and exposes the one capability the service
//! needs: single-sample prediction.

use std::fs;
use std::path::Path;

use linfa::traits::Predict;
use linfa_trees::DecisionTree;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::features::UrlFeatures;
use crate::UrlGuardError;

/// Binary verdict for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Label 0
    Malicious,
    /// Label 1
    Safe,
}

impl Verdict {
    /// Wire label: 0 = malicious, 1 = safe.
    pub fn label(self) -> u8 {
        match self {
            Verdict::Malicious => 0,
            Verdict::Safe => 1,
        }
    }

    /// Human-readable verdict for the API response.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Malicious => "Malicious URL",
            Verdict::Safe => "Safe URL",
        }
    }

    fn from_label(label: usize) -> Self {
        if label == 0 {
            Verdict::Malicious
        } else {
            Verdict::Safe
        }
    }
}

/// Classifier capability: one method, so the concrete model can be swapped
/// for a stub in tests.
pub trait UrlClassifier: Send + Sync {
    /// Predict the verdict for a single feature vector.
    fn predict(&self, features: &UrlFeatures) -> Result<Verdict, UrlGuardError>;
}

/// On-disk model artifact.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature schema the forest was trained on, in input order.
    pub feature_names: Vec<String>,
    /// Trees of the forest.
    pub trees: Vec<DecisionTree<f64, usize>>,
}

/// Random-forest classifier restored from a serialized artifact.
///
/// Read-only after construction; prediction performs no internal mutation,
/// so a single instance serves concurrent requests without locking.
#[derive(Debug)]
pub struct ForestClassifier {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl ForestClassifier {
    /// Load an artifact from disk and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UrlGuardError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| UrlGuardError::Model(format!("read {}: {}", path.display(), e)))?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .map_err(|e| UrlGuardError::Model(format!("decode {}: {}", path.display(), e)))?;
        Self::from_artifact(artifact)
    }

    /// Validate schema compatibility and build the classifier.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, UrlGuardError> {
        if artifact.trees.is_empty() {
            return Err(UrlGuardError::Model("artifact contains no trees".into()));
        }
        if !artifact
            .feature_names
            .iter()
            .map(String::as_str)
            .eq(UrlFeatures::FEATURE_NAMES)
        {
            return Err(UrlGuardError::Model(format!(
                "artifact schema {:?} does not match expected {:?}",
                artifact.feature_names,
                UrlFeatures::FEATURE_NAMES
            )));
        }
        // Trees must only reference features that exist in the schema.
        for (i, tree) in artifact.trees.iter().enumerate() {
            if let Some(&idx) = tree
                .features()
                .iter()
                .find(|&&idx| idx >= UrlFeatures::FEATURE_NAMES.len())
            {
                return Err(UrlGuardError::Model(format!(
                    "tree {} references feature index {} outside the schema",
                    i, idx
                )));
            }
        }
        Ok(Self {
            trees: artifact.trees,
        })
    }

    /// Number of trees in the forest.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

impl UrlClassifier for ForestClassifier {
    fn predict(&self, features: &UrlFeatures) -> Result<Verdict, UrlGuardError> {
        let row = features.to_vector();
        let records = Array2::from_shape_vec((1, row.len()), row)
            .map_err(|e| UrlGuardError::Inference(e.to_string()))?;

        let mut malicious = 0usize;
        let mut safe = 0usize;
        for tree in &self.trees {
            match tree.predict(&records)[0] {
                0 => malicious += 1,
                _ => safe += 1,
            }
        }

        // Majority vote; ties resolve to malicious.
        Ok(if safe > malicious {
            Verdict::Safe
        } else {
            Verdict::Malicious
        })
    }
}
