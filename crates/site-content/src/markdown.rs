//! Markdown to HTML with anchor ids on every heading
//!
//! Table-of-contents links elsewhere on the page point at `#<slug>` anchors,
//! so [`slugify`] must stay byte-for-byte stable.

use lazy_static::lazy_static;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Anything that is not an ASCII word character, whitespace or hyphen
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\s-]+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-+").unwrap();
}

/// Turn heading text into an anchor id.
///
/// `"Average Junk Removal Costs!"` becomes `"average-junk-removal-costs"`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// A heading found in a markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub id: String,
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Walk the event stream, stamping each heading start tag with the slug of
/// its plain text. Also reports the headings it saw.
fn with_heading_ids<'a>(events: impl Iterator<Item = Event<'a>>) -> (Vec<Event<'a>>, Vec<TocEntry>) {
    let mut out = Vec::new();
    let mut headings = Vec::new();
    // (index of the Start event in `out`, text collected so far)
    let mut open: Option<(usize, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                open = Some((out.len(), String::new()));
                out.push(event);
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some((start, text)) = open.take() {
                    let id = slugify(&text);
                    if let Event::Start(Tag::Heading { id: slot, .. }) = &mut out[start] {
                        *slot = Some(CowStr::from(id.clone()));
                    }
                    headings.push(TocEntry {
                        level: level_number(level),
                        text: text.trim().to_string(),
                        id,
                    });
                }
                out.push(event);
            }
            other => {
                if let Some((_, text)) = open.as_mut() {
                    match &other {
                        Event::Text(t) | Event::Code(t) => text.push_str(t),
                        Event::SoftBreak | Event::HardBreak => text.push(' '),
                        _ => {}
                    }
                }
                out.push(other);
            }
        }
    }

    (out, headings)
}

/// Render a markdown body to HTML
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let (events, _) = with_heading_ids(parser);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Second- and third-level headings of a markdown body, in document order
pub fn table_of_contents(markdown: &str) -> Vec<TocEntry> {
    let parser = Parser::new_ext(markdown, markdown_options());
    let (_, headings) = with_heading_ids(parser);
    headings
        .into_iter()
        .filter(|h| (2..=3).contains(&h.level))
        .collect()
}
