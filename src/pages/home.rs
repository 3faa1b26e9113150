use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::force_graph::ForceGraphCanvas;
use crate::graph::{DataError, GraphModel};

/// Id of the `<script type="application/json">` element holding the dataset.
const DATASET_ELEMENT: &str = "graph-data";

fn dataset_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let script: HtmlScriptElement = document
		.get_element_by_id(DATASET_ELEMENT)?
		.dyn_into()
		.ok()?;
	script.text().ok()
}

fn load_graph() -> Result<GraphModel, DataError> {
	let json = dataset_text().ok_or(DataError::MissingDataset)?;
	info!("dataset: {} bytes", json.len());
	GraphModel::from_json(&json)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let model = match load_graph() {
		Ok(model) => Rc::new(model),
		Err(e) => {
			error!("failed to load graph: {e}");
			return view! {
				<h1>"Uh oh! Something went wrong!"</h1>
				<p>"Errors: "</p>
				<ul>
					<li>{e.to_string()}</li>
				</ul>
			}
			.into_any();
		}
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas model=model fullscreen=true />
			<div class="graph-overlay">
				<h1>"Topic Graph"</h1>
				<p class="subtitle">
					"Hover or click a node for details. Drag nodes to reposition. Scroll to zoom."
				</p>
			</div>
		</div>
	}
	.into_any()
}
