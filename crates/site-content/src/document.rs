//! City document discovery and loading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{ContentError, ContentResult};
use crate::frontmatter::{split_front_matter, CityFrontMatter};

/// File extension of city content files
pub const MARKDOWN_EXTENSION: &str = ".md";

/// A parsed city content file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDocument {
    /// File name without extension
    pub slug: String,
    pub front_matter: CityFrontMatter,
    /// Markdown following the front matter
    pub body: String,
}

/// Slugs of every markdown file directly inside `dir`, sorted
pub fn list_slugs(dir: &Path) -> ContentResult<Vec<String>> {
    let io_err = |source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut slugs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        match name.strip_suffix(MARKDOWN_EXTENSION) {
            Some(slug) if !slug.is_empty() => slugs.push(slug.to_string()),
            _ => debug!("Skipping non-markdown entry {}", name),
        }
    }

    slugs.sort();
    Ok(slugs)
}

/// A slug can only name a file directly inside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

/// Read and parse `<dir>/<slug>.md`
pub fn load_document(dir: &Path, slug: &str) -> ContentResult<CityDocument> {
    if !is_valid_slug(slug) {
        return Err(ContentError::NotFound(slug.to_string()));
    }

    let path = dir.join(format!("{}{}", slug, MARKDOWN_EXTENSION));
    let source = fs::read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ContentError::NotFound(slug.to_string()),
        _ => ContentError::Io { path, source },
    })?;

    parse_document(slug, &source)
}

/// Split file contents into front matter and body
pub fn parse_document(slug: &str, source: &str) -> ContentResult<CityDocument> {
    let front_matter_err = |message: String| ContentError::FrontMatter {
        slug: slug.to_string(),
        message,
    };

    let (yaml, body) = split_front_matter(source);
    let front_matter = match yaml {
        Some(yaml) => CityFrontMatter::from_yaml(yaml).map_err(front_matter_err)?,
        None => CityFrontMatter::default(),
    };

    Ok(CityDocument {
        slug: slug.to_string(),
        front_matter,
        body: body.to_string(),
    })
}
