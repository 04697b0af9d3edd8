use crate::core::{
    AssignmentOutcome, AssignmentResult, AssignmentSource, ConfigProvider, FallbackMode,
    Resolution,
};
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::validate_candidates;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;
use std::time::Duration;

pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1500);

pub const DEFAULT_FAMILIES: [&str; 8] = [
    "Grace Family",
    "Hope Family",
    "Faith Family",
    "Love Family",
    "Peace Family",
    "Joy Family",
    "Wisdom Family",
    "Light Family",
];

pub fn default_families() -> Vec<String> {
    DEFAULT_FAMILIES.iter().map(|s| s.to_string()).collect()
}

/// Decides what a member sees when the assignment call fails.
///
/// In [`FallbackMode::Mask`] every failure, whatever its cause, turns into a
/// success after `delay`, with a family picked uniformly from `families`.
/// In [`FallbackMode::Fail`] the failure is handed back as an error.
pub struct FallbackPolicy {
    mode: FallbackMode,
    delay: Duration,
    families: Vec<String>,
    rng: Mutex<StdRng>,
}

impl FallbackPolicy {
    pub fn new(families: Vec<String>, delay: Duration) -> Result<Self> {
        validate_candidates("fallback.families", &families)?;
        Ok(Self {
            mode: FallbackMode::Mask,
            delay,
            families,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let policy = Self::new(config.fallback_families().to_vec(), config.fallback_delay())?
            .with_mode(config.fallback_mode());
        Ok(match config.fallback_seed() {
            Some(seed) => policy.with_seed(seed),
            None => policy,
        })
    }

    pub fn with_mode(mut self, mode: FallbackMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn mode(&self) -> FallbackMode {
        self.mode
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Picks one family uniformly at random.
    pub fn pick(&self) -> AssignmentResult {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // `new` rejects empty candidate lists.
        let family = self
            .families
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_default();
        AssignmentResult::new(family)
    }

    pub async fn resolve(&self, outcome: AssignmentOutcome) -> Result<Resolution> {
        match outcome {
            AssignmentOutcome::Success(result) => Ok(Resolution {
                result,
                source: AssignmentSource::Service,
            }),
            AssignmentOutcome::Failure(reason) => match self.mode {
                FallbackMode::Mask => {
                    tracing::warn!(
                        "⚠️ Assignment service unavailable ({}), using local fallback in {:?}",
                        reason,
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    let result = self.pick();
                    tracing::info!("🎲 Fallback assigned: {}", result.family_name);
                    Ok(Resolution {
                        result,
                        source: AssignmentSource::Fallback(reason),
                    })
                }
                FallbackMode::Fail => {
                    tracing::error!("❌ Assignment failed: {}", reason);
                    Err(AssignError::AssignmentFailed { reason })
                }
            },
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            mode: FallbackMode::Mask,
            delay: DEFAULT_FALLBACK_DELAY,
            families: default_families(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl std::fmt::Debug for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackPolicy")
            .field("mode", &self.mode)
            .field("delay", &self.delay)
            .field("families", &self.families)
            .finish_non_exhaustive()
    }
}
