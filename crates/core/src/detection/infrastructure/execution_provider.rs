use std::path::Path;

use ort::session::Session;

/// Return the preferred accelerated ONNX execution providers for the current platform.
///
/// Empty when the platform has no accelerated backend wired in.
pub fn preferred_execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

/// Human-readable name of the backend a session will try first.
pub fn backend_label(use_gpu: bool) -> &'static str {
    if !use_gpu {
        return "CPU";
    }
    #[cfg(target_os = "macos")]
    {
        "CoreML"
    }
    #[cfg(target_os = "windows")]
    {
        "DirectML"
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "CPU"
    }
}

/// Build an inference session for `model_path`.
///
/// With `use_gpu`, the platform's accelerated provider is registered first.
/// ONNX Runtime drops back to the CPU provider when registration fails, so a
/// missing GPU only ever produces a log line.
pub fn build_session(
    model_path: &Path,
    use_gpu: bool,
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut builder = Session::builder()?;

    if use_gpu {
        let providers = preferred_execution_providers();
        if providers.is_empty() {
            log::warn!(
                "GPU requested but no accelerated backend is available on this platform, using CPU for {}",
                model_path.display()
            );
        } else {
            log::info!(
                "Using {} backend for {}",
                backend_label(true),
                model_path.display()
            );
            builder = builder.with_execution_providers(providers)?;
        }
    }

    let session = builder.commit_from_file(model_path)?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_label_when_gpu_disabled() {
        assert_eq!(backend_label(false), "CPU");
    }

    #[test]
    fn test_label_matches_provider_list() {
        let has_gpu_provider = !preferred_execution_providers().is_empty();
        assert_eq!(backend_label(true) != "CPU", has_gpu_provider);
    }

    #[test]
    fn test_build_session_missing_model_is_error() {
        let result = build_session(Path::new("/nonexistent/model.onnx"), false);
        assert!(result.is_err());
    }
}
