// src/specs/mod.rs
//! # Page-shape descriptors
//!
//! Each portal page variant gets one declarative descriptor: named fields
//! mapping to table positions, column indices, and wait-selector markers.
//! The extractors in `crate::extract` are data-driven interpreters over these
//! shapes, so a new page variant is a new constant, not a new function.
//!
//! Conventions:
//! - Table positions are 0-based indices over *top-level* tables in the
//!   document slice (the string-scan equivalent of `table:nth-child(n)`).
//! - Column indices are 0-based over `<td>` cells in a row.
//! - Wait selectors carry both the CSS-ish name (for error messages and logs)
//!   and the marker substring that proves presence in fetched markup.
//!
//! Specs know where the ground truth lives; `extract` knows how to read it;
//! caching and orchestration live above both (`store`, `refresh`).

pub mod attendance;
pub mod marks;
pub mod registration;
pub mod timetable;

/// A waitable element: CSS-ish name for humans, marker substring for the
/// presence check against fetched markup.
#[derive(Clone, Copy, Debug)]
pub struct Selector {
    pub css: &'static str,
    pub marker: &'static str,
}
