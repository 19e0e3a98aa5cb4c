//! Static export
//!
//! Writes the same pages the server renders into a directory tree that any
//! static host can serve:
//!
//! ```text
//! <out>/index.html
//! <out>/cities/<slug>/index.html
//! <out>/forms/index.html
//! <out>/pkg/...            (copied from the assets directory, if present)
//! ```
//!
//! Unlike the home page route, a city that fails to load fails the build.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::pages;

/// What an export produced
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub pages: Vec<PathBuf>,
    pub assets_copied: usize,
}

fn write_page(out: &Path, relative: &str, html: &str) -> anyhow::Result<PathBuf> {
    let path = out.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

fn copy_dir(from: &Path, to: &Path) -> anyhow::Result<usize> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;
    let mut copied = 0;
    for entry in fs::read_dir(from).with_context(|| format!("Failed to read {}", from.display()))? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

pub fn export_site(config: &SiteConfig, out: &Path) -> anyhow::Result<ExportSummary> {
    let library = config.library();
    let cities = library
        .cities()
        .with_context(|| format!("Failed to load content from {}", config.content_dir.display()))?;

    let mut summary = ExportSummary::default();
    summary
        .pages
        .push(write_page(out, "index.html", &pages::home_page(&cities))?);

    for doc in &cities {
        let page = site_content::render_document(doc);
        let relative = format!("cities/{}/index.html", doc.slug);
        summary
            .pages
            .push(write_page(out, &relative, &pages::city_page(&page, &cities))?);
    }

    summary.pages.push(write_page(
        out,
        "forms/index.html",
        &pages::form_registration_page(),
    )?);

    if config.assets_dir.is_dir() {
        summary.assets_copied = copy_dir(&config.assets_dir, &out.join("pkg"))?;
    } else {
        warn!(
            "Assets directory {} not found; pages will load without the form script",
            config.assets_dir.display()
        );
    }

    info!(
        "Exported {} pages and {} assets to {}",
        summary.pages.len(),
        summary.assets_copied,
        out.display()
    );
    Ok(summary)
}
