#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::{create_test_sale, get_test_connection, in_current_month, in_month};
pub(crate) use http::{assert_content_type, parse_json, serve_seed_document};
