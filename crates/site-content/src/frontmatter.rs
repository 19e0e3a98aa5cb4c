//! Front matter parsing
//!
//! City files open with a YAML block fenced by `---` lines. Every key is
//! optional: a missing or null key reads as an empty string and scalar
//! values of other types are stringified.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

const DELIMITER: &str = "---";

/// Metadata header of a city content file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityFrontMatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

impl CityFrontMatter {
    /// Parse the YAML between the delimiters
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Split a file into its YAML header and markdown body.
///
/// Returns `(None, source)` when the file has no header at all. An opening
/// fence that is never closed makes the rest of the file the header and
/// leaves the body empty.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some(rest) = strip_opening_fence(source) else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (Some(rest), "")
}

fn strip_opening_fence(source: &str) -> Option<&str> {
    let (first, rest) = match source.find('\n') {
        Some(idx) => (&source[..idx], &source[idx + 1..]),
        None => (source, ""),
    };
    (first.trim_end() == DELIMITER).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_header_and_body() {
        let source = "---\ntitle: Junk Removal in Oakville\ncity: Oakville\n---\n# Hello\n";
        let (yaml, body) = split_front_matter(source);
        assert_eq!(yaml, Some("title: Junk Removal in Oakville\ncity: Oakville\n"));
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn test_split_without_header() {
        let source = "# Just markdown\n\nNo header here.";
        let (yaml, body) = split_front_matter(source);
        assert!(yaml.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let source = "\u{feff}---\r\ncity: Toronto\r\n---\r\nBody";
        let (yaml, body) = split_front_matter(source);
        assert_eq!(yaml, Some("city: Toronto\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_header_takes_rest_of_file() {
        let (yaml, body) = split_front_matter("---\ntitle: Oops\n# Body");
        assert_eq!(yaml, Some("title: Oops\n# Body"));
        assert_eq!(body, "");
        // The trailing line reads as a YAML comment
        assert_eq!(CityFrontMatter::from_yaml(yaml.unwrap()).unwrap().title, "Oops");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let source = "---\ncity: Oakville\n---\nAbove\n\n---\n\nBelow\n";
        let (_, body) = split_front_matter(source);
        assert_eq!(body, "Above\n\n---\n\nBelow\n");
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let fm = CityFrontMatter::from_yaml("title: Junk Removal\ncity: Oakville\n").unwrap();
        assert_eq!(fm.title, "Junk Removal");
        assert_eq!(fm.city, "Oakville");
        assert_eq!(fm.state, "");
        assert_eq!(fm.description, "");
    }

    #[test]
    fn test_scalars_are_stringified() {
        let fm = CityFrontMatter::from_yaml("slug: 2024\nstate: ~\ncity: true\n").unwrap();
        assert_eq!(fm.slug, "2024");
        assert_eq!(fm.state, "");
        assert_eq!(fm.city, "true");
    }

    #[test]
    fn test_non_mapping_header_is_an_error() {
        assert!(CityFrontMatter::from_yaml("- one\n- two\n").is_err());
        assert!(CityFrontMatter::from_yaml("title: [unclosed\n").is_err());
    }

    #[test]
    fn test_blank_header_is_default() {
        assert_eq!(
            CityFrontMatter::from_yaml("  \n").unwrap(),
            CityFrontMatter::default()
        );
    }
}
