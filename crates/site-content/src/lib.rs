//! City landing-page content pipeline
//!
//! Each city page comes from one markdown file in a content directory:
//!
//! 1. [`list_slugs`] discovers the pages (one per `*.md` file)
//! 2. [`load_document`] reads a file and splits front matter from body
//! 3. [`render_markdown`] turns the body into HTML with heading anchors
//! 4. [`apply_info_cards`] regroups label/value paragraphs into cards
//!
//! Nothing is cached: every render re-reads the directory.

pub mod cards;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod markdown;

use std::path::PathBuf;

pub use cards::{apply_info_cards, info_items, InfoItem};
pub use document::{list_slugs, load_document, parse_document, CityDocument};
pub use error::{ContentError, ContentResult};
pub use frontmatter::CityFrontMatter;
pub use markdown::{render_markdown, slugify, table_of_contents, TocEntry};

/// A city page ready to be dropped into a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCity {
    pub slug: String,
    pub front_matter: CityFrontMatter,
    /// Body HTML after the info-card pass
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render a parsed document
pub fn render_document(doc: &CityDocument) -> RenderedCity {
    let html = apply_info_cards(&render_markdown(&doc.body));
    RenderedCity {
        slug: doc.slug.clone(),
        front_matter: doc.front_matter.clone(),
        html,
        toc: table_of_contents(&doc.body),
    }
}

/// The content directory holding one markdown file per city
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    dir: PathBuf,
}

impl ContentLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slugs(&self) -> ContentResult<Vec<String>> {
        list_slugs(&self.dir)
    }

    /// Front matter of every city, in slug order
    pub fn cities(&self) -> ContentResult<Vec<CityDocument>> {
        self.slugs()?
            .iter()
            .map(|slug| load_document(&self.dir, slug))
            .collect()
    }

    pub fn load(&self, slug: &str) -> ContentResult<CityDocument> {
        load_document(&self.dir, slug)
    }

    /// Load and render one page; any failure aborts the whole page
    pub fn render(&self, slug: &str) -> ContentResult<RenderedCity> {
        let doc = self.load(slug)?;
        tracing::debug!("Rendering city page '{}'", slug);
        Ok(render_document(&doc))
    }
}
