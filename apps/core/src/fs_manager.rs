use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the persisted sentiment model inside the models directory.
pub const MODEL_ARTIFACT_FILENAME: &str = "sentiment_model.bin";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Returns the application root directory (where the executable lives).
    pub fn root_dir() -> PathBuf {
        let exe = match std::env::current_exe() {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                return Self::current_dir();
            }
        };

        let mut path = exe;
        path.pop(); // exe name

        if cfg!(debug_assertions) {
            // In development the executable sits in target/debug at the workspace root;
            // point at apps/core instead so the data directory stays with the crate.
            let mut workspace = path.clone();
            workspace.pop(); // debug
            workspace.pop(); // target

            let core_path = workspace.join("apps").join("core");
            if core_path.exists() {
                return core_path;
            }
        }

        path
    }

    fn current_dir() -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Main data directory (./data).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Models directory (./data/models).
    pub fn models_dir() -> PathBuf {
        Self::data_dir().join("models")
    }

    /// Well-known location of the sentiment model artifact.
    pub fn default_model_path() -> PathBuf {
        Self::models_dir().join(MODEL_ARTIFACT_FILENAME)
    }

    /// Creates the parent directories of `path` if they do not exist yet.
    pub fn ensure_parent_dir(path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating directory: {:?}", parent);
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Initializes the directory tree (data and models).
    pub fn init() -> Result<(), std::io::Error> {
        let models_path = Self::models_dir();

        if !models_path.exists() {
            info!("Creating models directory: {:?}", models_path);
            fs::create_dir_all(&models_path)?;
        }

        Ok(())
    }
}
