//! `setTimeout`-backed clear scheduler

use std::time::Duration;

use upload_core::{ClearScheduler, ClearTask};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::dom::js_message;
use crate::page::timeout_millis;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl ClearScheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: ClearTask) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("No window; status message will not be cleared");
            return;
        };

        // Freed by wasm-bindgen once it has run
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            timeout_millis(delay),
        ) {
            tracing::warn!(error = %js_message(&e), "Cannot schedule status clear");
        }
    }
}
