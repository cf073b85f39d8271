//! Codecs for JSON Patch operation descriptors.

pub mod json;
