#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Survey and interview project manager built on a declarative form layer.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod schemas;
pub mod storage;
pub mod tui;
