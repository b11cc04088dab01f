//! Reading graph documents from a file or from the host page.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use super::types::GraphDocument;
use crate::{GraphError, Result};

/// Parse a graph document from JSON text.
pub fn parse_str(json_text: &str) -> Result<GraphDocument> {
	let doc: GraphDocument = serde_json::from_str(json_text)?;
	info!(
		"commit-graph: loaded {} nodes, {} edges",
		doc.nodes.len(),
		doc.edges.len()
	);
	Ok(doc)
}

/// Read and parse the graph document stored at `path`.
pub fn load_path(path: impl AsRef<Path>) -> Result<GraphDocument> {
	let path = path.as_ref();
	let text = fs::read_to_string(path).map_err(|source| match source.kind() {
		ErrorKind::NotFound => GraphError::NotFound(path.display().to_string()),
		_ => GraphError::Io {
			path: path.to_path_buf(),
			source,
		},
	})?;
	parse_str(&text)
}

/// Read the text of a `<script type="application/json">` element by id.
///
/// Returns `None` when the page carries no such element, so callers can
/// fall back to other sources.
pub fn script_text(element_id: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(element_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the graph document embedded in the page under `element_id`.
pub fn load_script_element(element_id: &str) -> Result<GraphDocument> {
	let text = script_text(element_id)
		.ok_or_else(|| GraphError::NotFound(format!("#{element_id}")))?;
	parse_str(&text)
}
