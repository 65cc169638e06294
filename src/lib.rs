//! Status dashboard layout engine.
//!
//! Selected host groups are shown as cards. Each card holds a honeycomb of
//! status cells, one per monitored host, packed to fill whatever space the
//! card currently has. Cards flow left to right on first display and can be
//! dragged and resized in an explicit edit mode; the resulting layout is
//! persisted to a key-value store and restored on the next load.
//!
//! The crate is UI-agnostic. A host layer feeds it container measurements,
//! pointer events, and refreshed item batches, and renders the geometry it
//! returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dashboard`] | Top-level [`dashboard::Dashboard`] tying the pieces together |
//! | [`hex`] | Status cells and the staggered honeycomb packer |
//! | [`hover`] | Clamped hover magnification |
//! | [`card`] | Card model, default sizes, and row-flow placement |
//! | [`editor`] | Edit-mode state machine and pointer gestures |
//! | [`input`] | Edit modes and drag/resize sessions |
//! | [`hit`] | Header and resize-handle hit-testing |
//! | [`geom`] | Points, sizes, rectangles, and row helpers |
//! | [`store`] | Key-value persistence of layout and selection |
//! | [`visibility`] | Session-scoped settings panel toggle |
//! | [`feed`] | Monitoring data shapes and the periodic refresh task |
//! | [`config`] | Environment configuration |
//! | [`error`] | Shared error type |
//! | [`consts`] | Shared numeric constants |

pub mod card;
pub mod config;
pub mod consts;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod feed;
pub mod geom;
pub mod hex;
pub mod hit;
pub mod hover;
pub mod input;
pub mod store;
pub mod visibility;
