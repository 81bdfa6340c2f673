//! Writes generated visuals to disk alongside a JSON manifest.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::domain::{DataUri, Product};
use tracing::info;

pub const MANIFEST_FILE: &str = "manifest.json";
const HERO_STEM: &str = "hero";

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: DateTime<Utc>,
    pub model: String,
    pub entries: Vec<ExportEntry>,
}

#[derive(Debug, Serialize)]
pub struct ExportEntry {
    pub target: String,
    pub name: String,
    pub file: PathBuf,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// Products without a generated visual are left out of the export.
pub async fn export_visuals(
    dir: &Path,
    model: &str,
    hero: Option<&DataUri>,
    products: &[Product],
) -> anyhow::Result<ExportManifest> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create export dir '{}'", dir.display()))?;

    let mut entries = Vec::new();
    if let Some(image) = hero {
        entries.push(write_image(dir, HERO_STEM, "Hero", image).await?);
    }
    for product in products {
        if let Some(image) = &product.generated_image {
            entries.push(write_image(dir, product.id.as_str(), &product.name, image).await?);
        }
    }

    let manifest = ExportManifest {
        exported_at: Utc::now(),
        model: model.to_string(),
        entries,
    };
    let manifest_path = dir.join(MANIFEST_FILE);
    let raw = serde_json::to_vec_pretty(&manifest)?;
    tokio::fs::write(&manifest_path, raw)
        .await
        .with_context(|| format!("failed to write '{}'", manifest_path.display()))?;

    info!(
        dir = %dir.display(),
        images = manifest.entries.len(),
        "exported visuals"
    );
    Ok(manifest)
}

async fn write_image(
    dir: &Path,
    stem: &str,
    name: &str,
    image: &DataUri,
) -> anyhow::Result<ExportEntry> {
    let bytes = image
        .decode()
        .with_context(|| format!("failed to decode visual for '{stem}'"))?;
    let file = PathBuf::from(format!("{stem}.{}", image.file_extension()));
    let path = dir.join(&file);
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("failed to write '{}'", path.display()))?;

    Ok(ExportEntry {
        target: stem.to_string(),
        name: name.to_string(),
        file,
        mime_type: image.mime_type().to_string(),
        size_bytes: bytes.len(),
    })
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
