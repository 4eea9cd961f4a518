//! collab-board: an interactive node-link board for planning work.
//!
//! Cards can be dragged, linked with labelled edges, laid out automatically,
//! and exported to or imported from a JSON document. The board renders to a
//! canvas from a WASM build; everything under [`components::board`] except
//! the canvas component itself runs without a browser.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::board::{
	BoardCanvas, BoardConfig, BoardState, DragController, Edge, EdgeDetails, Graph, GraphError,
	GraphSnapshot, LinkController, LinkState, NewNode, Node, NodePatch, Point, seed_graph,
	snapshot,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("collab-board: logging initialized");
}

/// Text of `<script id="{id}">`, if the page has one.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load board settings from a script element with id="board-config".
fn load_config() -> BoardConfig {
	let Some(json_text) = script_text("board-config") else {
		return BoardConfig::default();
	};
	match BoardConfig::from_json(&json_text) {
		Ok(config) => config,
		Err(e) => {
			warn!("collab-board: failed to parse board config: {}", e);
			BoardConfig::default()
		}
	}
}

/// Load a board document from a script element with id="board-data".
/// Expected format: an export document, `{ nodes: [...], edges: [...] }`.
fn load_board_document() -> Option<Graph> {
	let json_text = script_text("board-data")?;
	match snapshot::import(&json_text) {
		Ok(graph) => Some(graph),
		Err(e) => {
			warn!("collab-board: failed to load board data: {}", e);
			None
		}
	}
}

/// Picks the first graph available from: the saved board, the page's
/// board document, the built-in seed.
fn initial_graph(config: &BoardConfig) -> Graph {
	let saved = config
		.persist
		.then(|| components::board::storage::load(&config.storage_key))
		.flatten();
	if let Some(graph) = saved {
		info!("collab-board: restored saved board");
		return graph;
	}
	load_board_document().unwrap_or_else(|| {
		info!("collab-board: starting from seed board");
		seed_graph()
	})
}

/// Main application component.
/// Loads config and board data from the DOM and renders the board.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let initial = initial_graph(&config);
	let theme = if config.theme == "paper" { "light" } else { "dark" };

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme />
		<Title text="Collaboration Board" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-board">
			<BoardCanvas initial=initial config=config />
			<div class="board-overlay">
				<p class="subtitle">
					"Drag cards to move them. Press L to link, A to add, Delete to remove. Scroll to zoom."
				</p>
			</div>
		</div>
	}
}
