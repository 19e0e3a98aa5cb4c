//! DOM side of the lead form
//!
//! Expects the markup rendered by `site-server`: a `<form>` with a
//! `button[type=submit]`, and a sibling confirmation panel carrying
//! `data-lead-confirmation` (initially `hidden`) with a
//! `[data-lead-confirmation-message]` element inside. The panel is looked
//! up within the form's parent, so a page can carry several forms.

use js_sys::Array;
use lead_form::{FormFields, FormHost, HostError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, Window,
};

const SUBMITTING_LABEL: &str = "Submitting...";
const CONFIRMATION_SELECTOR: &str = "[data-lead-confirmation]";
const CONFIRMATION_MESSAGE_SELECTOR: &str = "[data-lead-confirmation-message]";

pub(crate) fn dom_err(err: JsValue) -> HostError {
    HostError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

pub struct WebFormHost {
    window: Window,
    document: Document,
    form: HtmlFormElement,
    /// Label of the submit button before it was disabled
    submit_label: Option<String>,
}

impl WebFormHost {
    pub fn new(window: Window, document: Document, form: HtmlFormElement) -> Self {
        let mut host = Self {
            window,
            document,
            form,
            submit_label: None,
        };
        host.submit_label = host.submit_button().and_then(|b| b.text_content());
        host
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        self.form
            .query_selector("button[type=submit]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    }

    fn confirmation_panel(&self) -> Option<HtmlElement> {
        self.form
            .parent_element()?
            .query_selector(CONFIRMATION_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// Hidden `POST` form mirroring `fields`, attached to `<body>`
    pub fn build_fallback_form(
        &self,
        action: &str,
        fields: &FormFields,
    ) -> Result<HtmlFormElement, HostError> {
        let fallback: HtmlFormElement = self.create("form")?;
        fallback.set_method("POST");
        fallback.set_action(action);
        fallback
            .style()
            .set_property("display", "none")
            .map_err(dom_err)?;

        for (name, value) in fields.iter() {
            let input: HtmlInputElement = self.create("input")?;
            input.set_type("hidden");
            input.set_name(name);
            input.set_value(value);
            fallback.append_child(&input).map_err(dom_err)?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| HostError::MissingElement("body".to_string()))?;
        body.append_child(&fallback).map_err(dom_err)?;
        Ok(fallback)
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T, HostError> {
        self.document
            .create_element(tag)
            .map_err(dom_err)?
            .dyn_into::<T>()
            .map_err(|_| HostError::Dom(format!("<{}> has an unexpected type", tag)))
    }
}

impl FormHost for WebFormHost {
    fn current_path(&self) -> Result<String, HostError> {
        self.window.location().pathname().map_err(dom_err)
    }

    fn current_search(&self) -> Result<String, HostError> {
        self.window.location().search().map_err(dom_err)
    }

    fn replace_url(&self, url: &str) -> Result<(), HostError> {
        self.window
            .history()
            .map_err(dom_err)?
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(dom_err)
    }

    fn collect_fields(&self) -> Result<FormFields, HostError> {
        let data = FormData::new_with_form(&self.form).map_err(dom_err)?;
        let entries = js_sys::try_iter(&data)
            .map_err(dom_err)?
            .ok_or_else(|| HostError::Dom("FormData is not iterable".to_string()))?;

        let mut fields = FormFields::new();
        for entry in entries {
            let pair = Array::from(&entry.map_err(dom_err)?);
            // File inputs yield Blobs; the lead form has none
            let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string())
            else {
                continue;
            };
            fields.push(name, value);
        }
        Ok(fields)
    }

    fn reset_fields(&self) {
        self.form.reset();
    }

    fn set_busy(&self, busy: bool) {
        let Some(button) = self.submit_button() else {
            return;
        };
        button.set_disabled(busy);
        let label = if busy {
            Some(SUBMITTING_LABEL)
        } else {
            self.submit_label.as_deref()
        };
        if label.is_some() {
            button.set_text_content(label);
        }
    }

    fn show_confirmation(&self, message: &str) {
        let Some(panel) = self.confirmation_panel() else {
            web_sys::console::warn_1(&"Lead form has no confirmation panel".into());
            return;
        };
        self.form.set_hidden(true);
        panel.set_hidden(false);
        if let Ok(Some(text)) = panel.query_selector(CONFIRMATION_MESSAGE_SELECTOR) {
            text.set_text_content(Some(message));
        }
    }

    fn submit_fallback(&self, action: &str, fields: &FormFields) -> Result<(), HostError> {
        self.build_fallback_form(action, fields)?
            .submit()
            .map_err(dom_err)
    }
}
