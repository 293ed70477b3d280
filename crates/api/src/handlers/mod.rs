//! HTTP request handlers, grouped by resource.

pub mod readings;
