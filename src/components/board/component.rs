//! Leptos component wrapping the board canvas.
//!
//! The component creates an HTML canvas element plus a toolbar, the
//! pending-edge form and an import panel. Mouse and wheel events on the
//! canvas, and key presses on the window, are forwarded to [`BoardState`].
//! A `requestAnimationFrame` loop redraws whenever the state is dirty.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent,
	Window,
};

use super::config::BoardConfig;
use super::error::GraphError;
use super::graph::Graph;
use super::render;
use super::state::{BoardState, Shortcut, seed_graph};
use super::storage;
use super::theme::Theme;
use super::types::EdgeDetails;

const NEW_CARD_LABEL: &str = "New card";
const EXPORT_FILENAME: &str = "board.json";

/// Bundles board state with its visual theme.
struct BoardContext {
	state: BoardState,
	theme: Theme,
}

/// Reactive mirrors of board state that the toolbar and forms display.
#[derive(Clone, Copy)]
struct BoardUi {
	link_mode: RwSignal<bool>,
	pending: RwSignal<bool>,
	status: RwSignal<String>,
	edge_label: RwSignal<String>,
	edge_kind: RwSignal<String>,
	import_open: RwSignal<bool>,
	import_text: RwSignal<String>,
	/// Something is selected, so the edit form shows.
	editing: RwSignal<bool>,
	edit_label: RwSignal<String>,
	edit_kind: RwSignal<String>,
}

impl BoardUi {
	fn new() -> Self {
		Self {
			link_mode: RwSignal::new(false),
			pending: RwSignal::new(false),
			status: RwSignal::new(String::new()),
			edge_label: RwSignal::new(String::new()),
			edge_kind: RwSignal::new(String::new()),
			import_open: RwSignal::new(false),
			import_text: RwSignal::new(String::new()),
			editing: RwSignal::new(false),
			edit_label: RwSignal::new(String::new()),
			edit_kind: RwSignal::new(String::new()),
		}
	}
}

/// Shared handle the event handlers clone.
#[derive(Clone)]
struct Board {
	context: Rc<RefCell<Option<BoardContext>>>,
	ui: BoardUi,
}

impl Board {
	/// Runs `f` against the board state, then syncs the UI signals and
	/// persists if the graph changed. Errors are logged and surfaced in the
	/// status line.
	fn update<R>(&self, f: impl FnOnce(&mut BoardState) -> Result<R, GraphError>) -> Option<R> {
		let mut guard = self.context.borrow_mut();
		let c = guard.as_mut()?;
		let was_pending = c.state.link.is_pending();
		let was_selected = c.state.selection.clone();
		let result = f(&mut c.state);

		if c.state.selection != was_selected {
			let details = c.state.selection_details();
			self.ui.editing.set(details.is_some());
			let details = details.unwrap_or_default();
			self.ui.edit_label.set(details.label);
			self.ui.edit_kind.set(details.kind);
		}

		let pending = c.state.link.is_pending();
		if pending && !was_pending {
			self.ui.edge_label.set(String::new());
			self.ui.edge_kind.set(String::new());
		}
		self.ui.pending.set(pending);
		self.ui.link_mode.set(c.state.link.is_active());

		if c.state.take_unsaved() && c.state.config.persist {
			storage::save(&c.state.config.storage_key, &c.state.graph);
		}

		match result {
			Ok(value) => Some(value),
			Err(e) => {
				warn!("collab-board: {e}");
				self.ui.status.set(e.to_string());
				None
			}
		}
	}

	fn shortcut(&self, shortcut: Shortcut) {
		match shortcut {
			Shortcut::Escape => {
				self.update(|s| {
					s.escape();
					Ok(())
				});
			}
			Shortcut::ToggleLinkMode => {
				self.update(|s| Ok(s.toggle_link_mode()));
			}
			Shortcut::AddNode => {
				self.update(|s| Ok(s.add_node(NEW_CARD_LABEL)));
			}
			Shortcut::DeleteSelection => {
				self.update(|s| s.delete_selection());
			}
			Shortcut::Save => self.save(),
		}
	}

	fn save(&self) {
		let saved = self
			.context
			.borrow()
			.as_ref()
			.map(|c| storage::save(&c.state.config.storage_key, &c.state.graph));
		match saved {
			Some(true) => self.ui.status.set("Saved".to_string()),
			Some(false) => self.ui.status.set("Could not save board".to_string()),
			None => {}
		}
	}

	fn export(&self) {
		let Some(document) = self.update(|s| s.export_json()) else {
			return;
		};
		match storage::download_json(EXPORT_FILENAME, &document) {
			Ok(()) => {
				info!("collab-board: exported {} bytes", document.len());
				self.ui.status.set(format!("Exported {EXPORT_FILENAME}"));
			}
			Err(e) => {
				warn!("collab-board: download failed: {e:?}");
				self.ui.status.set("Download failed".to_string());
			}
		}
	}

	fn import(&self) {
		let text = self.ui.import_text.get_untracked();
		let imported = self.update(|s| {
			s.import_json(&text)?;
			Ok(s.graph.node_count())
		});
		if let Some(count) = imported {
			self.ui.status.set(format!("Imported {count} cards"));
			self.ui.import_open.set(false);
			self.ui.import_text.set(String::new());
		}
	}

	fn save_edit(&self) {
		let (label, kind) = (
			self.ui.edit_label.get_untracked(),
			self.ui.edit_kind.get_untracked(),
		);
		if let Some(true) = self.update(|s| s.edit_selection(&label, &kind)) {
			self.ui.status.set("Updated".to_string());
		}
	}

	fn commit_link(&self) {
		let details = EdgeDetails::new(
			self.ui.edge_label.get_untracked(),
			self.ui.edge_kind.get_untracked(),
		);
		if let Some(Some(edge)) = self.update(|s| s.commit_link(details)) {
			self.ui.status.set(format!("Linked {} → {}", edge.source_id, edge.target_id));
		}
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(read(window.inner_width(), 800.0), read(window.inner_height(), 600.0))
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Whether a key press belongs to a text field rather than the board.
fn typing_in_field(ev: &KeyboardEvent) -> bool {
	ev.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
}

/// Renders an interactive collaboration board filling the window.
///
/// `initial` is the graph shown on first paint; `config` controls
/// persistence, snapping, zoom bounds and layout spacing.
#[component]
pub fn BoardCanvas(initial: Graph, config: BoardConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let board = Board {
		context: Rc::new(RefCell::new(None)),
		ui: BoardUi::new(),
	};
	let ui = board.ui;
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));

	let board_init = board.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("collab-board: canvas 2d context unavailable");
			return;
		};

		let theme = Theme::by_name(&config.theme);
		*board_init.context.borrow_mut() = Some(BoardContext {
			state: BoardState::new(initial.clone(), config.clone(), w, h),
			theme,
		});
		info!("collab-board: canvas ready at {w}x{h}");

		let (context_resize, canvas_resize) = (board_init.context.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let board_keys = board_init.clone();
		*keydown_cb.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if typing_in_field(&ev) {
				return;
			}
			let Some(shortcut) = Shortcut::from_key(&ev.key(), ev.ctrl_key() || ev.meta_key())
			else {
				return;
			};
			ev.prevent_default();
			board_keys.shortcut(shortcut);
		}));
		if let Some(ref cb) = *keydown_cb.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (board_init.context.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.take_dirty() {
					render::render(&c.state, &ctx, &c.theme);
				}
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let board_md = board.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);
		board_md.update(|s| s.pointer_down(x, y));
	};

	let board_mm = board.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);
		board_mm.update(|s| s.pointer_move(x, y));
	};

	let board_mu = board.clone();
	let on_mouseup = move |_: MouseEvent| {
		board_mu.update(|s| {
			s.pointer_up();
			Ok(())
		});
	};

	let board_ml = board.clone();
	let on_mouseleave = move |_: MouseEvent| {
		board_ml.update(|s| {
			s.pointer_leave();
			Ok(())
		});
	};

	let board_wh = board.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);
		board_wh.update(|s| {
			s.wheel(x, y, ev.delta_y());
			Ok(())
		});
	};

	let (b_add, b_link, b_delete, b_arrange, b_relax) = (
		board.clone(),
		board.clone(),
		board.clone(),
		board.clone(),
		board.clone(),
	);
	let b_edit = board.clone();
	let (b_save, b_export, b_reset, b_import, b_create, b_cancel) = (
		board.clone(),
		board.clone(),
		board.clone(),
		board.clone(),
		board.clone(),
		board.clone(),
	);

	view! {
		<div class="board-toolbar">
			<button on:click=move |_| b_add.shortcut(Shortcut::AddNode)>"Add card"</button>
			<button
				class:active=move || ui.link_mode.get()
				on:click=move |_| b_link.shortcut(Shortcut::ToggleLinkMode)
			>
				{move || if ui.link_mode.get() { "Link mode: on" } else { "Link mode: off" }}
			</button>
			<button on:click=move |_| b_delete.shortcut(Shortcut::DeleteSelection)>"Delete"</button>
			<button on:click=move |_| {
				b_arrange.update(|s| s.arrange());
			}>"Arrange"</button>
			<button on:click=move |_| {
				b_relax.update(|s| s.relax());
			}>"Relax"</button>
			<button on:click=move |_| b_save.save()>"Save"</button>
			<button on:click=move |_| b_export.export()>"Export"</button>
			<button on:click=move |_| ui.import_open.update(|open| *open = !*open)>"Import…"</button>
			<button on:click=move |_| {
				b_reset.update(|s| {
					s.replace_graph(seed_graph());
					Ok(())
				});
			}>"Reset"</button>
			<span class="board-status">{move || ui.status.get()}</span>
		</div>

		<div
			class="board-edge-form"
			style:display=move || if ui.pending.get() { "flex" } else { "none" }
		>
			<input
				type="text"
				placeholder="Label"
				prop:value=move || ui.edge_label.get()
				on:input=move |ev| ui.edge_label.set(event_target_value(&ev))
			/>
			<input
				type="text"
				placeholder="Type"
				prop:value=move || ui.edge_kind.get()
				on:input=move |ev| ui.edge_kind.set(event_target_value(&ev))
			/>
			<button on:click=move |_| b_create.commit_link()>"Create"</button>
			<button on:click=move |_| {
				b_cancel.update(|s| {
					s.cancel_link();
					Ok(())
				});
			}>"Cancel"</button>
		</div>

		<div
			class="board-edit-form"
			style:display=move || {
				if ui.editing.get() && !ui.link_mode.get() { "flex" } else { "none" }
			}
		>
			<input
				type="text"
				placeholder="Label"
				prop:value=move || ui.edit_label.get()
				on:input=move |ev| ui.edit_label.set(event_target_value(&ev))
			/>
			<input
				type="text"
				placeholder="Type"
				prop:value=move || ui.edit_kind.get()
				on:input=move |ev| ui.edit_kind.set(event_target_value(&ev))
			/>
			<button on:click=move |_| b_edit.save_edit()>"Save changes"</button>
		</div>

		<div
			class="board-import"
			style:display=move || if ui.import_open.get() { "flex" } else { "none" }
		>
			<textarea
				placeholder="Paste an exported board.json"
				prop:value=move || ui.import_text.get()
				on:input=move |ev| ui.import_text.set(event_target_value(&ev))
			></textarea>
			<button on:click=move |_| b_import.import()>"Load"</button>
			<button on:click=move |_| ui.import_open.set(false)>"Close"</button>
		</div>

		<canvas
			node_ref=canvas_ref
			class="board-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style:display="block"
			style:cursor=move || if ui.link_mode.get() { "crosshair" } else { "grab" }
		/>
	}
}
