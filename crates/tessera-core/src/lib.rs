//! Tessera Core Types and Definitions
//!
//! This crate provides the foundational types for the Tessera chart and
//! diagram renderer. It includes:
//!
//! - **Colors**: CSS color validation and theme-variable paints ([`color::Paint`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: SVG drawing helpers: layers, strokes and text ([`draw`] module)
//! - **Semantic**: The chart and diagram data model and its builders ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
