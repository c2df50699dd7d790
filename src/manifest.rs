//! Theme manifests: filename-to-category parsing, directory builds, and
//! file/HTTP loading.
//!
//! A manifest is the JSON `ThemeDefinition` served per theme. Production
//! is a static-build step (`pizza-clock manifest <dir>`) that enumerates
//! asset files and derives each category from a fixed filename pattern;
//! consumption is `load`, which reads the JSON from a local path or over
//! HTTP and hands the definition to the theme layer.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;
use thiserror::Error;

use crate::settings::Theme;
use crate::theme::{ThemeDefinition, ThemeFile};

// Asset filenames carry their category: pizza_12p_7p_000.webp is a
// seven-piece pizza, circular_3p_000.webp a circular-theme asset.
static PIZZA_CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pizza_12p_(\d+p)_").unwrap());
static CIRCULAR_CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"circular_(\d*p)_").unwrap());

/// The manifest could not be retrieved or understood.
///
/// Non-fatal to the viewer: it degrades to "no theme data yet" and keeps
/// whatever background it had.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch manifest {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("manifest is not a valid theme definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Derive a categorized file entry from an asset path.
///
/// Returns `None` when the filename does not match the theme's pattern;
/// such files are skipped at manifest-build time.
pub fn parse_asset_path(path: &str, theme: Theme) -> Option<ThemeFile> {
    let re = match theme {
        Theme::Pizza12p => &PIZZA_CATEGORY_RE,
        Theme::Circular => &CIRCULAR_CATEGORY_RE,
    };
    let category = re.captures(path)?.get(1)?.as_str().to_string();
    Some(ThemeFile {
        category,
        path: path.to_string(),
    })
}

/// Build a manifest by enumerating asset files under `dir`.
///
/// Entries are sorted by filename so repeated builds are byte-identical.
/// `path_prefix` replaces the on-disk directory in each entry's path
/// (the served location differs from the build location).
pub fn build(dir: &Path, theme: Theme, path_prefix: &str) -> Result<ThemeDefinition, ManifestError> {
    let entries = fs::read_dir(dir).map_err(|e| ManifestError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut files = Vec::new();
    for name in names {
        let served = if path_prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", path_prefix.trim_end_matches('/'), name)
        };
        match parse_asset_path(&served, theme) {
            Some(file) => files.push(file),
            None => debug!("manifest: skipping uncategorized file {name}"),
        }
    }

    info!(
        "manifest: built {} definition with {} file(s) from {}",
        theme.as_str(),
        files.len(),
        dir.display()
    );

    Ok(match theme {
        Theme::Pizza12p => ThemeDefinition::Pizza { files },
        Theme::Circular => ThemeDefinition::Circular { files },
    })
}

/// Manifest location for a theme under `base` (directory or URL).
pub fn source(base: &str, theme: Theme) -> String {
    format!("{}/{}.json", base.trim_end_matches('/'), theme.as_str())
}

/// Load a theme definition from a local path or an `http(s)://` URL.
pub fn load(source: &str) -> Result<ThemeDefinition, ManifestError> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        fetch(source)?
    } else {
        fs::read_to_string(source).map_err(|e| ManifestError::Io {
            path: source.to_string(),
            source: e,
        })?
    };

    let definition: ThemeDefinition = serde_json::from_str(&text)?;
    if definition.files().is_empty() {
        warn!("manifest: {source} lists no files");
    }
    debug!(
        "manifest: loaded {} file(s) from {source}",
        definition.files().len()
    );
    Ok(definition)
}

fn fetch(url: &str) -> Result<String, ManifestError> {
    let wrap = |e: ureq::Error| ManifestError::Fetch {
        url: url.to_string(),
        source: Box::new(e),
    };
    let mut response = ureq::get(url).call().map_err(wrap)?;
    response.body_mut().read_to_string().map_err(wrap)
}
