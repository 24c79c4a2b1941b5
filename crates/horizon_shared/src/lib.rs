//! # HORIZON Shared
//!
//! Math types used by every crate in the workspace and by external
//! consumers of the streamed world (renderer, flight model, camera).
//!
//! ## Rule
//!
//! This crate must never depend on an engine, GPU or windowing crate.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{normalize_degrees, Pose, Rect, Vec2, Vec3};
