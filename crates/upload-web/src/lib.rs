//! upload-web - browser host for the upload form
//!
//! Attaches an [`UploadController`](upload_core::UploadController) to the
//! page served at `/`: the `#uploadForm` form, its `input[type="file"]` and
//! the `#message` element. The native form submission is suppressed and the
//! file goes out through `fetch`.
//!
//! Build the module the page loads from `/pkg`:
//!
//! ```text
//! wasm-pack build crates/upload-web --target web --out-dir ../../pkg
//! ```
//!
//! Everything except [`page`] only exists on wasm32.

pub mod page;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod timer;

pub use page::PageError;

#[cfg(target_arch = "wasm32")]
pub use dom::{mount, mount_when_ready, DomFileInput, DomForm, DomStatus, PageElements};
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;
#[cfg(target_arch = "wasm32")]
pub use timer::TimeoutScheduler;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use tracing_subscriber::fmt::format::Pretty;
    use tracing_subscriber::prelude::*;
    use tracing_web::{performance_layer, MakeConsoleWriter};

    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeConsoleWriter);
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .init();

    if let Err(e) = mount_when_ready(upload_core::ControllerConfig::default()) {
        tracing::error!(error = %e, "Upload form not attached");
    }
}
