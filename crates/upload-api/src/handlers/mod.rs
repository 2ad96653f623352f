//! HTTP request handlers for the upload API

pub mod page;
pub mod upload;
