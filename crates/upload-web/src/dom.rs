//! DOM adapters for the controller's host seams

use std::sync::Arc;

use parking_lot::Mutex;
use upload_core::{
    ControllerConfig, ControllerParts, FileInput, SelectedFile, StatusMessage, StatusSink,
    UploadController, UploadForm,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Event, File, HtmlElement, HtmlFormElement, HtmlInputElement,
};

use crate::fetch::FetchTransport;
use crate::page::{PageError, FILE_INPUT_SELECTOR, FORM_ID, MESSAGE_ID};
use crate::timer::TimeoutScheduler;

/// Readable text for a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(value: JsValue) -> PageError {
    PageError::Js(js_message(&value))
}

/// The three elements the form needs
pub struct PageElements {
    pub form: HtmlFormElement,
    pub input: HtmlInputElement,
    pub message: HtmlElement,
}

impl PageElements {
    pub fn find(document: &Document) -> Result<Self, PageError> {
        let form = document
            .get_element_by_id(FORM_ID)
            .ok_or(PageError::Missing(FORM_ID))?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| PageError::WrongKind {
                element: FORM_ID,
                expected: "form",
            })?;

        let message = document
            .get_element_by_id(MESSAGE_ID)
            .ok_or(PageError::Missing(MESSAGE_ID))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::WrongKind {
                element: MESSAGE_ID,
                expected: "HTML element",
            })?;

        let input = document
            .query_selector(FILE_INPUT_SELECTOR)
            .map_err(js_error)?
            .ok_or(PageError::Missing(FILE_INPUT_SELECTOR))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PageError::WrongKind {
                element: FILE_INPUT_SELECTOR,
                expected: "input",
            })?;

        Ok(Self {
            form,
            input,
            message,
        })
    }
}

// The host seams are Send + Sync; wasm32 runs the page on one thread.
unsafe impl Send for DomForm {}
unsafe impl Sync for DomForm {}
unsafe impl Send for DomFileInput {}
unsafe impl Sync for DomFileInput {}
unsafe impl Send for DomStatus {}
unsafe impl Sync for DomStatus {}

pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl UploadForm for DomForm {
    fn reset(&self) {
        self.form.reset();
    }
}

/// File picker whose contents are read before each submission
///
/// Browsers only hand out file data asynchronously, so [`DomFileInput::load`]
/// takes a snapshot that `selected_files` then returns.
pub struct DomFileInput {
    input: HtmlInputElement,
    snapshot: Mutex<Vec<SelectedFile>>,
}

impl DomFileInput {
    pub fn new(input: HtmlInputElement) -> Self {
        Self {
            input,
            snapshot: Mutex::new(Vec::new()),
        }
    }

    /// Read the first chosen file, replacing the previous snapshot
    pub async fn load(&self) -> Result<(), PageError> {
        let first = self.input.files().and_then(|list| list.get(0));
        let loaded = match first {
            Some(file) => read_file(&file).await.map(|f| vec![f]),
            None => Ok(Vec::new()),
        };

        match loaded {
            Ok(files) => {
                *self.snapshot.lock() = files;
                Ok(())
            }
            Err(e) => {
                self.snapshot.lock().clear();
                Err(e)
            }
        }
    }
}

impl FileInput for DomFileInput {
    fn selected_files(&self) -> Vec<SelectedFile> {
        self.snapshot.lock().clone()
    }
}

async fn read_file(file: &File) -> Result<SelectedFile, PageError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(js_error)?;
    let data = js_sys::Uint8Array::new(&buffer).to_vec();
    tracing::debug!(file_name = %file.name(), size = data.len(), "Read selected file");

    let selected = SelectedFile::new(file.name(), data);
    let content_type = file.type_();
    Ok(if content_type.is_empty() {
        selected
    } else {
        selected.with_content_type(content_type)
    })
}

/// The `#message` element
pub struct DomStatus {
    element: HtmlElement,
}

impl DomStatus {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl StatusSink for DomStatus {
    fn render(&self, message: &StatusMessage) {
        self.element.set_text_content(Some(&message.text));
        self.element.set_class_name(message.severity.css_class());
    }

    fn clear(&self) {
        // Styling stays until the next message
        self.element.set_text_content(Some(""));
    }
}

/// Attach a controller to the form in `document`
///
/// The submit listener stays registered for the lifetime of the page.
pub fn mount(
    document: &Document,
    config: ControllerConfig,
) -> Result<Arc<UploadController>, PageError> {
    let elements = PageElements::find(document)?;
    let file_input = Arc::new(DomFileInput::new(elements.input));

    let controller = Arc::new(UploadController::new(
        config,
        ControllerParts {
            form: Arc::new(DomForm::new(elements.form.clone())),
            file_input: file_input.clone(),
            status: Arc::new(DomStatus::new(elements.message)),
            transport: Arc::new(FetchTransport),
            scheduler: Arc::new(TimeoutScheduler),
        },
    ));

    let on_submit = {
        let controller = Arc::clone(&controller);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();

            let controller = Arc::clone(&controller);
            let file_input = Arc::clone(&file_input);
            spawn_local(async move {
                if let Err(e) = file_input.load().await {
                    tracing::error!(error = %e, "Cannot read the selected file");
                }
                controller.handle_submit().await;
            });
        })
    };
    elements
        .form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_submit.forget();

    tracing::info!(endpoint = %controller.config().endpoint, "Upload form attached");
    Ok(controller)
}

/// [`mount`] now, or once the document has been parsed
pub fn mount_when_ready(config: ControllerConfig) -> Result<(), PageError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PageError::Js("No document".to_string()))?;

    if document.ready_state() != "loading" {
        return mount(&document, config).map(|_| ());
    }

    let target = document.clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = mount(&target, config) {
            tracing::error!(error = %e, "Upload form not attached");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(js_error)
}
