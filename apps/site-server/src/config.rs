//! Runtime configuration shared by the server and the static exporter

use std::path::PathBuf;

use site_content::ContentLibrary;

/// Brand shown in page titles and the footer
pub const SITE_NAME: &str = "Junk Removal GTA";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory holding one `<slug>.md` per city
    pub content_dir: PathBuf,
    /// wasm-pack output, served under `/pkg`
    pub assets_dir: PathBuf,
}

impl SiteConfig {
    pub fn new(content_dir: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            assets_dir: assets_dir.into(),
        }
    }

    /// Content is re-read on every request; the library is just a path
    pub fn library(&self) -> ContentLibrary {
        ContentLibrary::new(&self.content_dir)
    }
}
