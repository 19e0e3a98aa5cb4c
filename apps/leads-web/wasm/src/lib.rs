//! WASM bindings for the lead capture form
//!
//! State lives in Rust (`lead_form::LeadFormController`); this crate only
//! adapts it to the DOM and `fetch`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { mount_lead_form } from '/pkg/leads_wasm.js';
//!
//! await init();
//! const form = mount_lead_form('lead-form', 'Oakville', 'Ontario');
//! console.log(form.state); // "idle", or "submitted" after ?success=true
//! ```

pub mod host;
pub mod transport;

use std::rc::Rc;

use lead_form::LeadFormController;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlFormElement};

pub use host::WebFormHost;
pub use transport::FetchTransport;

type WebController = LeadFormController<WebFormHost, FetchTransport>;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Handle to a mounted form
#[wasm_bindgen]
pub struct MountedLeadForm {
    controller: Rc<WebController>,
}

#[wasm_bindgen]
impl MountedLeadForm {
    /// "idle", "submitting" or "submitted"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.controller.state().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn city(&self) -> String {
        self.controller.city().to_string()
    }

    /// Province or state the form was mounted for
    #[wasm_bindgen(getter)]
    pub fn region(&self) -> String {
        self.controller.region().to_string()
    }
}

/// Wire up the form with id `form_id`.
///
/// Checks the URL for the success flag, then takes over the form's submit
/// event: the default navigation is cancelled and the lead is posted in
/// the background, falling back to a native POST if that fails.
#[wasm_bindgen]
pub fn mount_lead_form(
    form_id: &str,
    city: String,
    state: String,
) -> Result<MountedLeadForm, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let form: HtmlFormElement = document
        .get_element_by_id(form_id)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", form_id)))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{} is not a form", form_id)))?;

    let host = WebFormHost::new(window.clone(), document, form.clone());
    let controller = Rc::new(LeadFormController::new(
        host,
        FetchTransport::new(window),
        city,
        state,
    ));

    controller
        .mount()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let on_submit = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let controller = Rc::clone(&controller);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = controller.submit().await {
                    web_sys::console::error_1(&format!("Form submission error: {}", e).into());
                }
            });
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // The form lives as long as the page
    on_submit.forget();

    Ok(MountedLeadForm { controller })
}
