//! Format implementations
//!
//! This module contains the concrete formats that convert between the deck
//! entity model and its serialized representations.

pub mod json;
pub mod workbook;

pub use json::JsonFormat;
pub use workbook::{SheetNames, WorkbookFormat};
