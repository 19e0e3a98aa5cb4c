//! Typed view of one lead

use crate::fields::FormFields;
use crate::{FORM_NAME, FORM_NAME_FIELD, HONEYPOT_FIELD};

/// Every field a lead submission carries, in the order the form renders them
pub const LEAD_FIELDS: [&str; 8] = [
    FORM_NAME_FIELD,
    "city",
    "state",
    HONEYPOT_FIELD,
    "name",
    "phone",
    "email",
    "message",
];

/// A single lead as captured by the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSubmission {
    pub form_name: String,
    pub city: String,
    pub state: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    /// Honeypot, left empty by humans
    pub bot_field: String,
}

impl LeadSubmission {
    /// Read a submission from posted fields. Missing fields are empty and a
    /// blank message is `None`.
    pub fn from_fields(fields: &FormFields) -> Self {
        let field = |name: &str| fields.get(name).unwrap_or_default().to_string();

        Self {
            form_name: field(FORM_NAME_FIELD),
            city: field("city"),
            state: field("state"),
            name: field("name"),
            phone: field("phone"),
            email: field("email"),
            message: fields
                .get("message")
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            bot_field: field(HONEYPOT_FIELD),
        }
    }

    pub fn to_fields(&self) -> FormFields {
        let mut fields = FormFields::new();
        fields.push(FORM_NAME_FIELD, self.form_name.as_str());
        fields.push("city", self.city.as_str());
        fields.push("state", self.state.as_str());
        fields.push(HONEYPOT_FIELD, self.bot_field.as_str());
        fields.push("name", self.name.as_str());
        fields.push("phone", self.phone.as_str());
        fields.push("email", self.email.as_str());
        fields.push("message", self.message.as_deref().unwrap_or_default());
        fields
    }

    /// Posted for the form this site registers
    pub fn is_registered_form(&self) -> bool {
        self.form_name == FORM_NAME
    }

    /// A bot filled in the honeypot
    pub fn is_spam(&self) -> bool {
        !self.bot_field.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_posted_fields() {
        let fields = FormFields::parse_urlencoded(
            "form-name=junk-removal-leads&city=Oakville&state=Ontario&bot-field=&name=Pat&phone=905-555-0100&email=pat%40example.com&message=",
        );
        let lead = LeadSubmission::from_fields(&fields);
        assert_eq!(
            lead,
            LeadSubmission {
                form_name: "junk-removal-leads".to_string(),
                city: "Oakville".to_string(),
                state: "Ontario".to_string(),
                name: "Pat".to_string(),
                phone: "905-555-0100".to_string(),
                email: "pat@example.com".to_string(),
                message: None,
                bot_field: String::new(),
            }
        );
        assert!(lead.is_registered_form());
        assert!(!lead.is_spam());
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let lead = LeadSubmission::from_fields(&FormFields::parse_urlencoded("name=Pat"));
        assert_eq!(lead.name, "Pat");
        assert_eq!(lead.email, "");
        assert!(!lead.is_registered_form());
    }

    #[test]
    fn test_honeypot_marks_spam() {
        let lead = LeadSubmission::from_fields(&FormFields::parse_urlencoded(
            "form-name=junk-removal-leads&bot-field=http%3A%2F%2Fspam.example",
        ));
        assert!(lead.is_spam());
    }

    #[test]
    fn test_to_fields_order() {
        let lead = LeadSubmission {
            form_name: FORM_NAME.to_string(),
            message: Some("Basement cleanout".to_string()),
            ..Default::default()
        };
        let fields = lead.to_fields();
        let names: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(names, LEAD_FIELDS.to_vec());
        assert_eq!(fields.get("message"), Some("Basement cleanout"));
    }
}
