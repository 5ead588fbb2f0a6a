use crate::error::AppError;
use crate::model::TaskRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "tasks.json";
const STORE_ENV_VAR: &str = "TASKCHAT_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    schema_version: u32,
    tasks: Vec<TaskRecord>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::persistence("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskchat")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::persistence("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskchat")
            .join(STORE_FILE_NAME))
    }
}

/// A missing store file is an empty list, so first runs need no setup.
pub fn load_records(path: &Path) -> Result<Vec<TaskRecord>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content =
        std::fs::read_to_string(path).map_err(|err| AppError::persistence(err.to_string()))?;
    let stored: StoredTasks =
        serde_json::from_str(&content).map_err(|err| AppError::persistence(err.to_string()))?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::persistence(format!(
            "unsupported schema_version {}",
            stored.schema_version
        )));
    }

    Ok(stored.tasks)
}

pub fn save_records(path: &Path, records: &[TaskRecord]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::persistence(err.to_string()))?;
    }

    let stored = StoredTasks {
        schema_version: SCHEMA_VERSION,
        tasks: records.to_vec(),
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| AppError::persistence(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::persistence(err.to_string()))?;

    Ok(())
}
