use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ingredient the detector claims is present in an image.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DetectedIngredient {
    /// Lower-cased canonical ingredient name.
    #[schema(example = "eggs")]
    pub name: String,
    /// Detection confidence in [0, 1].
    #[schema(example = 0.92)]
    pub confidence: f64,
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("image not readable: {0}")]
    ImageUnreadable(String),
    #[error("detection backend error: {0}")]
    Backend(String),
}

/// Ingredient detection capability: image reference in, scored
/// ingredient list out.
///
/// This boundary is what decouples the upload/scan handlers and the
/// recipe matcher from whatever detection backend is plugged in.
#[async_trait]
pub trait IngredientDetector: Send + Sync {
    async fn detect(&self, image_path: &Path) -> Result<Vec<DetectedIngredient>, DetectorError>;
}

/// Fixed catalog returned by the stub, with canned confidences.
const MOCK_CATALOG: &[(&str, f64)] = &[
    ("milk", 0.88),
    ("eggs", 0.92),
    ("butter", 0.75),
    ("cheese", 0.68),
];

/// Placeholder detector: sleeps for a configured delay, then returns a
/// randomly sized (2-4), randomly ordered subset of [`MOCK_CATALOG`].
/// The image file is never inspected.
pub struct StubDetector {
    delay: Duration,
}

impl StubDetector {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait]
impl IngredientDetector for StubDetector {
    async fn detect(&self, _image_path: &Path) -> Result<Vec<DetectedIngredient>, DetectorError> {
        // Simulate inference latency.
        tokio::time::sleep(self.delay).await;

        let mut rng = rand::rng();
        let mut catalog: Vec<_> = MOCK_CATALOG.to_vec();
        catalog.shuffle(&mut rng);
        let count = rng.random_range(2..=4);

        Ok(catalog
            .into_iter()
            .take(count)
            .map(|(name, confidence)| DetectedIngredient {
                name: name.to_string(),
                confidence,
            })
            .collect())
    }
}
