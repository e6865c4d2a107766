//! TrueType font lookup for overlay text.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

/// Well-known font files tried in order when no explicit font is configured.
fn system_font_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "macos")]
    candidates.extend(
        [
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Verdana.ttf",
        ]
        .map(PathBuf::from),
    );

    #[cfg(target_os = "windows")]
    {
        let windir = std::env::var_os("WINDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("C:\\Windows"));
        for name in ["arial.ttf", "segoeui.ttf", "verdana.ttf"] {
            candidates.push(windir.join("Fonts").join(name));
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    candidates.extend(
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        ]
        .map(PathBuf::from),
    );

    if let Some(dir) = dirs::font_dir() {
        for name in ["DejaVuSans.ttf", "Arial.ttf", "arial.ttf"] {
            candidates.push(dir.join(name));
        }
    }

    candidates
}

/// Read and parse a font file.
pub fn load_font_file(path: &Path) -> Result<FontVec, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let font = FontVec::try_from_vec(bytes)
        .map_err(|e| format!("Invalid font {}: {e}", path.display()))?;
    Ok(font)
}

/// Resolve the overlay font: `explicit` first, then system fonts.
///
/// Returns `None` when nothing usable is found.
pub fn find_font(explicit: Option<&Path>) -> Option<FontVec> {
    if let Some(path) = explicit {
        match load_font_file(path) {
            Ok(font) => {
                log::info!("Using overlay font {}", path.display());
                return Some(font);
            }
            Err(e) => log::warn!("Cannot load font {}: {e}", path.display()),
        }
    }

    system_font_candidates()
        .into_iter()
        .filter(|p| p.is_file())
        .find_map(|p| match load_font_file(&p) {
            Ok(font) => {
                log::debug!("Using system font {}", p.display());
                Some(font)
            }
            Err(e) => {
                log::debug!("Skipping font {}: {e}", p.display());
                None
            }
        })
}
