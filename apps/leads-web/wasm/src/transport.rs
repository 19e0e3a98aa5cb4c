//! Background submission over `window.fetch`

use async_trait::async_trait;
use lead_form::{LeadTransport, TransportError, FORM_CONTENT_TYPE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

fn js_err(err: JsValue) -> TransportError {
    TransportError(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl LeadTransport for FetchTransport {
    async fn post_form(&self, path: &str, body: String) -> Result<u16, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(path, &opts).map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", FORM_CONTENT_TYPE)
            .map_err(js_err)?;

        let response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let response: Response = response.dyn_into().map_err(js_err)?;

        Ok(response.status())
    }
}
