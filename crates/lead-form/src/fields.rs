//! Ordered form field sets and their urlencoded wire format

use url::form_urlencoded;

use crate::{FORM_NAME, FORM_NAME_FIELD};

/// Named form values in document order. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value recorded for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with `form-name` forced to the registered form as the first
    /// entry. Any `form-name` the page supplied is dropped.
    pub fn with_form_name(&self) -> FormFields {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push((FORM_NAME_FIELD.to_string(), FORM_NAME.to_string()));
        entries.extend(
            self.entries
                .iter()
                .filter(|(key, _)| key != FORM_NAME_FIELD)
                .cloned(),
        );
        FormFields { entries }
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    pub fn parse_urlencoded(body: &str) -> FormFields {
        form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect()
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        FormFields {
            entries: iter.into_iter().collect(),
        }
    }
}

/// True when the query string carries `<key>=true`
pub fn query_flag(search: &str, key: &str) -> bool {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes()).any(|(k, v)| k == key && v == "true")
}

/// The query string with every `<key>` parameter removed. Returns `""` when
/// nothing is left, otherwise a string starting with `?`.
pub fn strip_query_param(search: &str, key: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    let remaining: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .filter(|(k, _)| k != key)
        .collect();

    if remaining.is_empty() {
        return String::new();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(remaining)
        .finish();
    format!("?{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_form_name_forced_first() {
        let collected = fields(&[
            ("city", "Oakville"),
            ("form-name", "something-else"),
            ("name", "Pat"),
        ]);
        let body = collected.with_form_name();
        assert_eq!(
            body.iter().collect::<Vec<_>>(),
            vec![
                ("form-name", "junk-removal-leads"),
                ("city", "Oakville"),
                ("name", "Pat"),
            ]
        );
    }

    #[test]
    fn test_form_name_added_when_missing() {
        let body = fields(&[("email", "pat@example.com")]).with_form_name();
        assert_eq!(body.get("form-name"), Some("junk-removal-leads"));
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_urlencoded_body() {
        let body = fields(&[
            ("form-name", "junk-removal-leads"),
            ("name", "Pat O'Neil"),
            ("message", "Old couch & fridge"),
            ("bot-field", ""),
        ])
        .to_urlencoded();
        assert_eq!(
            body,
            "form-name=junk-removal-leads&name=Pat+O%27Neil&message=Old+couch+%26+fridge&bot-field="
        );
    }

    #[test]
    fn test_parse_urlencoded() {
        let parsed = FormFields::parse_urlencoded("city=St.+Catharines&phone=905%20555");
        assert_eq!(parsed.get("city"), Some("St. Catharines"));
        assert_eq!(parsed.get("phone"), Some("905 555"));
        assert_eq!(parsed.get("email"), None);
    }

    #[test]
    fn test_query_flag() {
        assert!(query_flag("?success=true", "success"));
        assert!(query_flag("?utm=x&success=true", "success"));
        assert!(!query_flag("?success=false", "success"));
        assert!(!query_flag("", "success"));
        assert!(!query_flag("?successful=true", "success"));
    }

    #[test]
    fn test_strip_query_param() {
        assert_eq!(strip_query_param("?success=true", "success"), "");
        assert_eq!(
            strip_query_param("?utm_source=ads&success=true", "success"),
            "?utm_source=ads"
        );
        assert_eq!(strip_query_param("", "success"), "");
    }

    proptest! {
        #[test]
        fn form_name_appears_exactly_once(
            pairs in proptest::collection::vec(("[a-z-]{1,10}", ".{0,20}"), 0..8)
        ) {
            let collected: FormFields = pairs.into_iter().collect();
            let body = collected.with_form_name();
            prop_assert_eq!(body.iter().next(), Some(("form-name", "junk-removal-leads")));
            prop_assert_eq!(body.iter().filter(|(k, _)| *k == "form-name").count(), 1);
        }
    }
}
