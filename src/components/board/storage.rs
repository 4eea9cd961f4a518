//! Browser persistence: localStorage save/load and file download.

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url};

use super::graph::Graph;
use super::snapshot;

fn local_storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

/// Loads the board saved under `key`, if any.
///
/// A saved document that no longer imports is logged and ignored so the
/// board can fall back to other sources.
pub fn load(key: &str) -> Option<Graph> {
	let document = local_storage()?.get_item(key).ok().flatten()?;
	match snapshot::import(&document) {
		Ok(graph) => Some(graph),
		Err(e) => {
			warn!("collab-board: ignoring saved board under {key:?}: {e}");
			None
		}
	}
}

/// Saves the board under `key`. Returns whether the write succeeded.
pub fn save(key: &str, graph: &Graph) -> bool {
	let Some(storage) = local_storage() else {
		warn!("collab-board: localStorage unavailable, board not saved");
		return false;
	};
	let document = match snapshot::export(graph) {
		Ok(document) => document,
		Err(e) => {
			warn!("collab-board: failed to serialize board: {e}");
			return false;
		}
	};
	match storage.set_item(key, &document) {
		Ok(()) => {
			debug!("collab-board: saved {} bytes under {key:?}", document.len());
			true
		}
		Err(e) => {
			warn!("collab-board: localStorage write failed: {e:?}");
			false
		}
	}
}

/// Offers `contents` to the user as a JSON file download.
pub fn download_json(filename: &str, contents: &str) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(filename);
	anchor.click();
	Url::revoke_object_url(&url)?;
	Ok(())
}
