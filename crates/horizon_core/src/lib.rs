//! # HORIZON Core
//!
//! Ownership primitives for the streamed world.
//!
//! Every object produced by world generation lives in an [`EntityArena`]
//! and is addressed through a generational [`EntityId`]. Owners (chunks)
//! keep plain handle lists and destroy them as a unit; there is no
//! implicit parent/child hierarchy.
//!
//! ## Example
//!
//! ```rust,ignore
//! use horizon_core::EntityArena;
//!
//! let mut arena = EntityArena::new();
//! let owned: Vec<_> = (0..3).map(|i| arena.spawn(i)).collect();
//! assert_eq!(arena.despawn_all(owned), 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod arena;
pub mod entity;

pub use arena::EntityArena;
pub use entity::EntityId;
