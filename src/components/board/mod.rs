//! Collaboration board: a canvas of cards joined by labelled links.
//!
//! The model ([`Graph`]) is plain data with atomic, validated operations.
//! Two controllers turn pointer input into graph changes:
//! - [`DragController`] moves a card by the pointer delta from where the
//!   drag started
//! - [`LinkController`] picks a source card, a target card, then commits an
//!   edge with a label and type from the pending-edge form
//!
//! [`BoardState`] ties the model, controllers and viewport together and is
//! what [`BoardCanvas`] drives from DOM events.
//!
//! # Example
//!
//! ```ignore
//! use collab_board::{BoardCanvas, BoardConfig, seed_graph};
//!
//! view! { <BoardCanvas initial=seed_graph() config=BoardConfig::default() /> }
//! ```

mod component;
pub mod config;
pub mod drag;
pub mod error;
pub mod graph;
pub mod layout;
pub mod link;
mod render;
pub mod scale;
pub mod snapshot;
pub mod state;
pub(crate) mod storage;
pub mod surface;
pub mod theme;
pub mod types;

pub use component::BoardCanvas;
pub use config::BoardConfig;
pub use drag::{DragController, DragState};
pub use error::{EntityKind, GraphError};
pub use graph::Graph;
pub use link::{LinkController, LinkState};
pub use state::{BoardState, Selection, Shortcut, seed_graph};
pub use surface::{Scene, ViewTransform};
pub use theme::Theme;
pub use types::{Edge, EdgeDetails, EdgePatch, GraphSnapshot, NewNode, Node, NodePatch, Point};
