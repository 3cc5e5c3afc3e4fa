//! Endpoint configuration loader.
//!
//! Each served endpoint is one directive file in the config directory,
//! `<name>.twms`, holding `Directive value` lines. The raster directives
//! (Size, PageSize, DataType, SkippedLevels, Projection, BoundingBox)
//! are handed to twms-core; SourcePath and SourcePostfix stay here and
//! shape the redirect the resolved tile address is rewritten onto.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use walkdir::WalkDir;

use twms_core::{RasterDescriptor, TileAddress};

/// One configured tWMS endpoint.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Endpoint name, taken from the file stem
    pub name: String,
    /// The raster this endpoint serves
    pub raster: RasterDescriptor,
    /// Tile service prefix resolved addresses redirect to
    pub source_path: Option<String>,
    /// Suffix appended to the redirect, e.g. ".jpg"
    pub source_postfix: String,
}

impl Endpoint {
    /// The redirect target for a resolved tile, `prefix/level/row/col`,
    /// with the hidden coarse levels subtracted from the level number.
    pub fn tile_location(&self, tile: &TileAddress) -> Option<String> {
        self.source_path.as_ref().map(|prefix| {
            format!(
                "{}/{}/{}/{}{}",
                prefix.trim_end_matches('/'),
                tile.exposed_level(&self.raster),
                tile.row,
                tile.col,
                self.source_postfix
            )
        })
    }
}

/// Parse directive text into a key/value map.
///
/// One directive per line: the first whitespace-separated word is the
/// key, the rest of the line is the raw value. Blank lines and `#`
/// comments are skipped. Keys are case-sensitive; a repeated key keeps
/// the last value.
pub fn parse_directives(text: &str) -> HashMap<String, String> {
    let mut directives = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        directives.insert(key.to_string(), value.trim().to_string());
    }
    directives
}

/// Build one endpoint from its directive file.
pub fn load_endpoint(path: &Path) -> Result<Endpoint> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("config file has no usable name")?
        .to_string();

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let directives = parse_directives(&text);

    let raster = RasterDescriptor::from_directives(&directives)
        .with_context(|| format!("endpoint '{}' configuration", name))?;

    Ok(Endpoint {
        name,
        raster,
        source_path: directives.get("SourcePath").cloned(),
        source_postfix: directives.get("SourcePostfix").cloned().unwrap_or_default(),
    })
}

/// Load every `.twms` file under the config directory.
///
/// A file that fails to configure is fatal: a half-activated service
/// would silently decline requests the operator believes it serves.
pub fn load_endpoints(config_dir: &Path) -> Result<HashMap<String, Endpoint>> {
    let mut endpoints = HashMap::new();

    for entry in WalkDir::new(config_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("twms") {
            continue;
        }

        let endpoint = load_endpoint(path)?;
        info!(
            endpoint = %endpoint.name,
            levels = endpoint.raster.n_levels(),
            skipped = endpoint.raster.skipped_levels,
            "configured endpoint"
        );
        if endpoint.source_path.is_none() {
            warn!(endpoint = %endpoint.name, "no SourcePath, responses will carry the address as JSON");
        }
        endpoints.insert(endpoint.name.clone(), endpoint);
    }

    Ok(endpoints)
}
