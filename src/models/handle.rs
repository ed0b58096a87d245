//! Model lifecycle.
//!
//! A handle is either `Loaded` or `Unloaded`, decided once at construction and
//! never changed. Loading never fails loudly: a missing or incompatible artifact
//! yields an `Unloaded` handle whose every prediction reports `ModelUnavailable`.
//!
//! `ModelHandle::shared` gives the process one lazily-loaded handle so every
//! caller predicts with the same model instance.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::PredictError;
use crate::io::model_file::read_model_file;
use crate::models::{LinearModel, Regressor};

enum ModelState {
    Unloaded { reason: String },
    Loaded(Box<dyn Regressor>),
}

/// Read-only access to a (possibly absent) price model.
pub struct ModelHandle {
    state: ModelState,
}

static SHARED: OnceLock<ModelHandle> = OnceLock::new();

impl ModelHandle {
    /// Load a model artifact from `path`.
    pub fn load(path: &Path) -> Self {
        let loaded = read_model_file(path)
            .map_err(|e| e.to_string())
            .and_then(|file| LinearModel::from_file(&file));

        match loaded {
            Ok(model) => {
                debug!(path = %path.display(), coefficients = model.coefficients().len(), "price model loaded");
                Self::from_regressor(model)
            }
            Err(reason) => {
                warn!(path = %path.display(), %reason, "price model unavailable");
                Self::unloaded(reason)
            }
        }
    }

    pub fn from_regressor(model: impl Regressor + 'static) -> Self {
        Self {
            state: ModelState::Loaded(Box::new(model)),
        }
    }

    pub fn unloaded(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unloaded {
                reason: reason.into(),
            },
        }
    }

    /// Process-wide handle, loaded from `path` on first use.
    ///
    /// Later calls return the same handle regardless of `path`.
    pub fn shared(path: &Path) -> &'static ModelHandle {
        SHARED.get_or_init(|| Self::load(path))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    /// The model, or `ModelUnavailable` with the load failure.
    pub fn regressor(&self) -> Result<&dyn Regressor, PredictError> {
        match &self.state {
            ModelState::Loaded(model) => Ok(model.as_ref()),
            ModelState::Unloaded { reason } => Err(PredictError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ModelState::Loaded(model) => f.debug_tuple("Loaded").field(&model.name()).finish(),
            ModelState::Unloaded { reason } => f.debug_struct("Unloaded").field("reason", reason).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::typical_attributes;
    use crate::domain::{FitQuality, ModelFile, ModelKind};
    use crate::features::{FEATURE_COUNT, FEATURE_NAMES, build_feature_vector};
    use crate::io::model_file::write_model_file;

    /// price = 1_000_000 + 4_000_000 * area_scaled
    fn area_model_file() -> ModelFile {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 4_000_000.0;
        ModelFile {
            tool: "fairprice".to_string(),
            kind: ModelKind::Linear,
            trained_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            intercept: 1_000_000.0,
            coefficients,
            quality: FitQuality { rmse: 0.0, r2: 1.0, n: 50 },
        }
    }

    #[test]
    fn written_artifact_loads_and_predicts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_model_file(&path, &area_model_file()).unwrap();

        let handle = ModelHandle::load(&path);
        assert!(handle.is_loaded(), "{handle:?}");
        let features = build_feature_vector(&typical_attributes());
        let price = handle.regressor().unwrap().predict(features.as_slice()).unwrap();
        assert_eq!(price, 3_000_000.0);
    }

    #[test]
    fn reordered_layout_gives_unloaded_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut file = area_model_file();
        file.feature_names.swap(0, 1);
        write_model_file(&path, &file).unwrap();

        let handle = ModelHandle::load(&path);
        assert!(!handle.is_loaded());
        match handle.regressor() {
            Err(PredictError::ModelUnavailable { reason }) => {
                assert!(reason.contains("feature layout mismatch"), "{reason}")
            }
            other => panic!("expected ModelUnavailable, got {:?}", other.map(|m| m.name().to_string())),
        }
    }

    #[test]
    fn missing_artifact_gives_unloaded_handle() {
        let handle = ModelHandle::load(Path::new("/definitely/not/here/model.json"));
        assert!(!handle.is_loaded());
        match handle.regressor() {
            Err(PredictError::ModelUnavailable { reason }) => assert!(reason.contains("model.json"), "{reason}"),
            other => panic!("expected ModelUnavailable, got {:?}", other.map(|m| m.name().to_string())),
        }
    }

    #[test]
    fn corrupt_artifact_gives_unloaded_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(!ModelHandle::load(&path).is_loaded());
    }

    #[test]
    fn shared_handle_is_initialized_once() {
        let a = ModelHandle::shared(Path::new("/missing/a.json"));
        let b = ModelHandle::shared(Path::new("/missing/b.json"));
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ModelHandle>();
    }
}
