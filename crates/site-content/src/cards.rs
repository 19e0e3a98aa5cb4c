//! Info-card post-processing
//!
//! Company listings in the city files are written as one paragraph of bold
//! labels, e.g. `**Phone:** 905-555-0100 **Hours:** 8am-6pm`. Once rendered,
//! such a paragraph is rewritten into a card with one styleable row per
//! label/value pair. Works on the generated HTML only.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// A paragraph made of nothing but `<strong>Label:</strong> value` runs
    static ref INFO_PARAGRAPH: Regex =
        Regex::new(r"<p>((?:<strong>[^<]+:</strong>[^<]*)+)</p>").unwrap();
    static ref INFO_ITEM: Regex = Regex::new(r"<strong>([^<]+):</strong>([^<]*)").unwrap();
}

/// One label/value pair pulled out of a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

/// Label/value pairs of a matched paragraph body, values trimmed
pub fn info_items(paragraph_body: &str) -> Vec<InfoItem<'_>> {
    INFO_ITEM
        .captures_iter(paragraph_body)
        .filter_map(|caps| {
            let label = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str().trim();
            Some(InfoItem { label, value })
        })
        .collect()
}

fn render_card(paragraph_body: &str) -> String {
    let items: String = info_items(paragraph_body)
        .into_iter()
        .map(|item| {
            format!(
                r#"<div class="company-info-item"><strong class="company-info-label">{}:</strong> <span class="company-info-value">{}</span></div>"#,
                item.label, item.value
            )
        })
        .collect();

    format!(r#"<div class="company-info-container">{}</div>"#, items)
}

/// Replace every label/value paragraph in `html` with an info card
pub fn apply_info_cards(html: &str) -> String {
    INFO_PARAGRAPH
        .replace_all(html, |caps: &Captures| render_card(&caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::render_markdown;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_two_pairs() {
        let html = "<p><strong>Size:</strong> Small <strong>Price:</strong> $99</p>";
        assert_eq!(
            apply_info_cards(html),
            concat!(
                r#"<div class="company-info-container">"#,
                r#"<div class="company-info-item"><strong class="company-info-label">Size:</strong> <span class="company-info-value">Small</span></div>"#,
                r#"<div class="company-info-item"><strong class="company-info-label">Price:</strong> <span class="company-info-value">$99</span></div>"#,
                r#"</div>"#,
            )
        );
    }

    #[test]
    fn test_single_pair() {
        let out = apply_info_cards("<p><strong>Phone:</strong>   905-555-0100  </p>");
        assert_eq!(out.matches("company-info-item").count(), 1);
        assert!(out.contains(r#"<span class="company-info-value">905-555-0100</span>"#));
    }

    #[test]
    fn test_other_paragraphs_untouched() {
        let html = concat!(
            "<h3 id=\"acme\">Acme Hauling</h3>\n",
            "<p>Intro text with <strong>bold</strong> words.</p>\n",
            "<p><strong>Phone:</strong> 555 <a href=\"/x\">link</a></p>\n",
            "<p><strong>Note</strong> no colon here</p>\n",
            "<p>Lead text <strong>Price:</strong> $99</p>\n",
        );
        assert_eq!(apply_info_cards(html), html);
    }

    #[test]
    fn test_only_matching_paragraph_changes() {
        let html = "<p>Before</p>\n<p><strong>Hours:</strong> 8-6</p>\n<p>After</p>\n";
        assert_eq!(
            apply_info_cards(html),
            concat!(
                "<p>Before</p>\n",
                r#"<div class="company-info-container"><div class="company-info-item"><strong class="company-info-label">Hours:</strong> <span class="company-info-value">8-6</span></div></div>"#,
                "\n<p>After</p>\n",
            )
        );
    }

    #[test]
    fn test_rendered_markdown_multiline_listing() {
        let html = render_markdown(
            "### Acme Hauling\n\n**Phone:** 905-555-0100\n**Website:** acme.example\n**Rating:** 4.8 &amp; up\n",
        );
        let out = apply_info_cards(&html);
        assert!(out.starts_with("<h3 id=\"acme-hauling\">Acme Hauling</h3>\n"));
        assert_eq!(out.matches("company-info-container").count(), 1);
        assert_eq!(out.matches("company-info-item").count(), 3);
        assert!(out.contains(r#"<span class="company-info-value">acme.example</span>"#));
        assert!(!out.contains("<p>"));
    }

    #[test]
    fn test_many_cards_in_one_document() {
        let html = "<p><strong>A:</strong> 1</p>\n<p>x</p>\n<p><strong>B:</strong> 2 <strong>C:</strong> 3</p>\n";
        let out = apply_info_cards(html);
        assert_eq!(out.matches("company-info-container").count(), 2);
        assert_eq!(out.matches("company-info-item").count(), 3);
    }

    #[test]
    fn test_label_keeps_inner_colons() {
        let items = info_items("<strong>Open: Weekdays:</strong> 9-5");
        assert_eq!(
            items,
            vec![InfoItem {
                label: "Open: Weekdays",
                value: "9-5"
            }]
        );
    }

    #[test]
    fn test_idempotent() {
        let once = apply_info_cards("<p><strong>Size:</strong> Small</p>");
        assert_eq!(apply_info_cards(&once), once);
    }

    proptest! {
        #[test]
        fn html_without_label_paragraphs_is_unchanged(body in "[a-zA-Z0-9 .,!?\n]{0,200}") {
            let html = render_markdown(&body);
            prop_assert_eq!(apply_info_cards(&html), html);
        }

        #[test]
        fn one_item_per_pair(pairs in proptest::collection::vec(("[A-Za-z]{1,12}", "[a-z0-9 $]{0,12}"), 1..6)) {
            let body: String = pairs
                .iter()
                .map(|(label, value)| format!("<strong>{}:</strong> {}", label, value))
                .collect();
            let out = apply_info_cards(&format!("<p>{}</p>", body));
            prop_assert_eq!(out.matches("company-info-item").count(), pairs.len());
            for (label, value) in &pairs {
                let expected = format!(
                    r#"<strong class="company-info-label">{}:</strong> <span class="company-info-value">{}</span>"#,
                    label,
                    value.trim()
                );
                prop_assert!(out.contains(&expected));
            }
        }
    }
}
