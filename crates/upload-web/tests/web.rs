//! Browser tests: run with `wasm-pack test --headless --firefox crates/upload-web`

#![cfg(target_arch = "wasm32")]

use upload_core::{ControllerConfig, Severity, StatusMessage, StatusSink};
use upload_web::{mount, DomStatus, PageError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlElement, HtmlFormElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Replace the body with the upload page's markup
fn render_page(doc: &Document) {
    doc.body().unwrap().set_inner_html(
        r#"<form id="uploadForm" action="/upload" method="post" enctype="multipart/form-data">
             <input type="file" name="file">
           </form>
           <div id="message"></div>"#,
    );
}

async fn next_tick() {
    let resolved = js_sys::Promise::resolve(&wasm_bindgen::JsValue::NULL);
    JsFuture::from(resolved).await.unwrap();
}

#[wasm_bindgen_test]
fn test_missing_form_is_reported() {
    let doc = document();
    doc.body().unwrap().set_inner_html(r#"<div id="message"></div>"#);

    let err = mount(&doc, ControllerConfig::default()).unwrap_err();
    assert_eq!(err, PageError::Missing("uploadForm"));
}

#[wasm_bindgen_test]
fn test_status_element_styling() {
    let doc = document();
    render_page(&doc);
    let element: HtmlElement = doc
        .get_element_by_id("message")
        .unwrap()
        .dyn_into()
        .unwrap();
    let status = DomStatus::new(element.clone());

    status.render(&StatusMessage::error("Error: File too large"));
    assert_eq!(element.text_content().unwrap(), "Error: File too large");
    assert_eq!(element.class_name(), Severity::Error.css_class());

    status.clear();
    assert_eq!(element.text_content().unwrap(), "");
    assert_eq!(element.class_name(), Severity::Error.css_class());
}

#[wasm_bindgen_test]
async fn test_submit_without_file() {
    let doc = document();
    render_page(&doc);
    let _controller = mount(&doc, ControllerConfig::default()).unwrap();

    let form: HtmlFormElement = doc
        .get_element_by_id("uploadForm")
        .unwrap()
        .dyn_into()
        .unwrap();
    let init = EventInit::new();
    init.set_cancelable(true);
    let submit = Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&submit).unwrap();

    // The native submission is cancelled
    assert!(submit.default_prevented());

    for _ in 0..4 {
        next_tick().await;
    }
    let message = doc.get_element_by_id("message").unwrap();
    assert_eq!(message.text_content().unwrap(), "Please select a file first");
    assert_eq!(message.class_name(), "text-red-500 mt-4 text-center");
}
