use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::MODELS_DIR_ENV;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model {name} not found (searched: {})", format_dirs(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },
}

fn format_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "nothing".into();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locate a model file by its fixed name.
///
/// Resolution order:
/// 1. `explicit_dir` (CLI flag or desktop setting)
/// 2. `$AGESIGHT_MODELS_DIR`
/// 3. User data directory (platform-specific)
/// 4. `./models` relative to the working directory
/// 5. `models/` next to the running executable
pub fn resolve(name: &str, explicit_dir: Option<&Path>) -> Result<PathBuf, ModelResolveError> {
    resolve_in(name, &search_dirs(explicit_dir))
}

/// Resolve `name` against an explicit list of directories, first match wins.
pub fn resolve_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, ModelResolveError> {
    for dir in dirs {
        let candidate = dir.join(name);
        if candidate.is_file() {
            log::debug!("Resolved model {name} at {}", candidate.display());
            return Ok(candidate);
        }
    }
    Err(ModelResolveError::NotFound {
        name: name.to_string(),
        searched: dirs.to_vec(),
    })
}

pub fn search_dirs(explicit_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = explicit_dir {
        dirs.push(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(MODELS_DIR_ENV) {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(dir) = model_data_dir() {
        dirs.push(dir);
    }
    dirs.push(PathBuf::from("models"));
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("models")))
    {
        dirs.push(dir);
    }
    dirs
}

/// Platform-specific model directory.
///
/// - macOS: `~/Library/Application Support/Agesight/models/`
/// - Linux: `$XDG_DATA_HOME/Agesight/models/` or `~/.local/share/Agesight/models/`
/// - Windows: `%APPDATA%/Agesight/models/`
pub fn model_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("Agesight").join("models"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_in_finds_file() {
        let tmp = TempDir::new().unwrap();
        let model = tmp.path().join("age_net.onnx");
        fs::write(&model, b"fake model").unwrap();

        let found = resolve_in("age_net.onnx", &[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(found, model);
    }

    #[test]
    fn test_resolve_in_first_match_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("m.onnx"), b"a").unwrap();
        fs::write(second.path().join("m.onnx"), b"b").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = resolve_in("m.onnx", &dirs).unwrap();
        assert_eq!(found, first.path().join("m.onnx"));
    }

    #[test]
    fn test_resolve_in_skips_missing_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("m.onnx"), b"a").unwrap();

        let dirs = vec![tmp.path().join("missing"), tmp.path().to_path_buf()];
        assert!(resolve_in("m.onnx", &dirs).is_ok());
    }

    #[test]
    fn test_resolve_in_ignores_directories_with_model_name() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("m.onnx")).unwrap();
        assert!(resolve_in("m.onnx", &[tmp.path().to_path_buf()]).is_err());
    }

    #[test]
    fn test_not_found_lists_searched_dirs() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_in("gender_net.onnx", &[tmp.path().to_path_buf()]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gender_net.onnx"));
        assert!(msg.contains(&tmp.path().display().to_string()));
    }

    #[test]
    fn test_search_dirs_starts_with_explicit_dir() {
        let dirs = search_dirs(Some(Path::new("/opt/models")));
        assert_eq!(dirs[0], PathBuf::from("/opt/models"));
        assert!(dirs.contains(&PathBuf::from("models")));
    }

    #[test]
    fn test_model_data_dir_mentions_app() {
        if let Some(dir) = model_data_dir() {
            assert!(dir.to_string_lossy().contains("Agesight"));
        }
    }
}
