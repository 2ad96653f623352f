//! How the page is looked up, and timer arithmetic

use std::time::Duration;

/// `id` of the upload form
pub const FORM_ID: &str = "uploadForm";

/// `id` of the status message element
pub const MESSAGE_ID: &str = "message";

/// Selector for the file picker, matched against the whole document
pub const FILE_INPUT_SELECTOR: &str = r#"input[type="file"]"#;

/// Errors while attaching to the page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Element not found: {0}")]
    Missing(&'static str),

    #[error("Element {element} is not a {expected}")]
    WrongKind {
        element: &'static str,
        expected: &'static str,
    },

    #[error("{0}")]
    Js(String),
}

/// `setTimeout` delay for `delay`, saturating at the largest accepted value
pub fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_millis() {
        assert_eq!(timeout_millis(Duration::from_millis(4000)), 4000);
        assert_eq!(timeout_millis(Duration::ZERO), 0);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), i32::MAX);
    }

    #[test]
    fn test_error_text() {
        assert_eq!(
            PageError::Missing(FORM_ID).to_string(),
            "Element not found: uploadForm"
        );
        assert_eq!(
            PageError::WrongKind {
                element: MESSAGE_ID,
                expected: "HTML element"
            }
            .to_string(),
            "Element message is not a HTML element"
        );
    }
}
