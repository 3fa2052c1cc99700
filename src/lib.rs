//! Diagram model and two-way synchronization for JSON-described flow diagrams.
//!
//! A diagram is written as JSON text or edited directly on a canvas. This
//! crate owns everything between those two surfaces: parsing the text into a
//! graph model, giving nodes grid positions, holding the live model the
//! renderer draws, applying direct edits to it, and deciding when text
//! overrides direct edits. The canvas itself (painting, pan/zoom, drag
//! physics) is external and talks to [`engine::Engine`] through callbacks and
//! [`render::Scene`] snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Mode controller, gesture callbacks, and [`engine::Action`]s |
//! | [`doc`] | Immutable snapshots and the live [`doc::GraphStore`] |
//! | [`ops`] | Atomic mutation operations applied to snapshots |
//! | [`parse`] | JSON text → [`model::Diagram`] |
//! | [`layout`] | Grid fallback positions |
//! | [`model`] | Nodes, edges, anchors, and edge styles |
//! | [`edit`] | In-place label/description edit session |
//! | [`input`] | Modifier keys and connect payloads from the renderer |
//! | [`render`] | Serializable scene for the renderer |
//! | [`ids`] | Fresh node and edge ids |
//! | [`samples`] | Built-in sample diagrams |
//! | [`config`] | Environment configuration |
//! | [`consts`] | Shared numeric and style constants |

pub mod config;
pub mod consts;
pub mod doc;
pub mod edit;
pub mod engine;
pub mod ids;
pub mod input;
pub mod layout;
pub mod model;
pub mod ops;
pub mod parse;
pub mod render;
pub mod samples;

pub use engine::{Action, Engine, Mode};
pub use parse::{ParseError, parse};
