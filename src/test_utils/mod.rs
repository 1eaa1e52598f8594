#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod seed;

pub(crate) use db::poison_lock;
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_status_ok, get_header};
pub(crate) use seed::{march_scenario, serve_seed_data};
