use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, Event, File, MouseEvent};

use super::file_io::{dropped_file, read_text, selected_file};
use super::notice::Notice;
use crate::network::ingest::{SourceFormat, check_file, json_to_graph};
use crate::network::{GraphModel, samples};

const PLACEHOLDER: &str = r#"{
  "nodes": [
    {"id": "1", "label": "Node 1", "type": "server"},
    {"id": "2", "label": "Node 2", "type": "client"}
  ],
  "edges": [
    {"id": "e1", "source": "1", "target": "2", "label": "connection"}
  ]
}"#;

/// Graph JSON from a file or the textarea.
#[component]
pub fn JsonLoader(
	#[prop(into)] on_load: Callback<GraphModel>,
	#[prop(into)] notify: Callback<Notice>,
) -> impl IntoView {
	let text = RwSignal::new(String::new());
	let drag_over = RwSignal::new(false);

	let load_file = move |file: File| {
		if let Err(e) = check_file(&file.name(), &file.type_(), SourceFormat::Json) {
			notify.run(Notice::error(e));
			return;
		}
		spawn_local(async move {
			match read_text(&file).await.and_then(|content| json_to_graph(&content)) {
				Ok(graph) => {
					notify.run(Notice::success(format!(
						"Successfully loaded {} nodes and {} edges",
						graph.nodes.len(),
						graph.edges.len()
					)));
					on_load.run(graph);
				}
				Err(e) => notify.run(Notice::error(format!("Failed to parse file: {e}"))),
			}
		});
	};

	let on_file = move |ev: Event| {
		if let Some(file) = selected_file(&ev) {
			load_file(file);
		}
	};
	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		drag_over.set(true);
	};
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		drag_over.set(false);
		if let Some(file) = dropped_file(&ev) {
			load_file(file);
		}
	};

	let on_submit = move |_: MouseEvent| match json_to_graph(&text.get_untracked()) {
		Ok(graph) => {
			text.set(String::new());
			notify.run(Notice::success("JSON data loaded successfully"));
			on_load.run(graph);
		}
		Err(e) => notify.run(Notice::error(e)),
	};

	let on_sample = move |_: MouseEvent| {
		notify.run(Notice::success("Sample data loaded"));
		on_load.run(samples::sample_graph());
	};

	view! {
		<section class="loader">
			<h2>"Upload Network Data"</h2>
			<div
				class={move || if drag_over.get() { "drop-zone drag-over" } else { "drop-zone" }}
				on:dragover=on_dragover
				on:dragleave=move |_| drag_over.set(false)
				on:drop=on_drop
			>
				<p>"Drop your JSON file here, or choose one"</p>
				<input type="file" accept={SourceFormat::Json.accept()} on:change=on_file />
			</div>
			<button on:click=on_sample>"Load Sample Data"</button>

			<h2>"Direct JSON Input"</h2>
			<textarea
				rows="8"
				class="mono"
				placeholder=PLACEHOLDER
				prop:value=move || text.get()
				on:input=move |ev| text.set(event_target_value(&ev))
			/>
			<button
				on:click=on_submit
				disabled=move || text.with(|t| t.trim().is_empty())
			>
				"Load JSON Data"
			</button>
		</section>
	}
}
