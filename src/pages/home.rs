use leptos::prelude::*;
use log::info;
use web_sys::MouseEvent;

use crate::components::file_io::download_json;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::json_loader::JsonLoader;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::tabular_loader::TabularLoader;
use crate::network::{GraphModel, SourceFormat};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// `None` until the first successful load; failed loads leave it untouched.
	let graph = RwSignal::new(None::<GraphModel>);
	let notice = RwSignal::new(None::<Notice>);
	let source = RwSignal::new(SourceFormat::Json);

	let on_load = Callback::new(move |loaded: GraphModel| {
		info!(
			"network visualized: {} nodes, {} edges",
			loaded.nodes.len(),
			loaded.edges.len()
		);
		graph.set(Some(loaded));
	});
	let notify = Callback::new(move |n: Notice| notice.set(Some(n)));

	let on_export = move |_: MouseEvent| {
		let result = graph.with_untracked(|g| match g {
			Some(g) => download_json(g).map(|_| Notice::success("Data exported successfully")),
			None => Ok(Notice::error("No data to export")),
		});
		notice.set(Some(result.unwrap_or_else(Notice::error)));
	};
	let on_clear = move |_: MouseEvent| {
		graph.set(Some(GraphModel::default()));
		notice.set(Some(Notice::success("Data cleared")));
	};

	let canvas_data = Signal::derive(move || graph.get().unwrap_or_default());
	let tab_class = move |format: SourceFormat| {
		move || if source.get() == format { "tab active" } else { "tab" }
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=canvas_data fullscreen=true />
				<div class="graph-overlay">
					<h1>"Network Visualizer"</h1>
					<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>

					<nav class="tabs">
						<button class={tab_class(SourceFormat::Json)} on:click=move |_| source.set(SourceFormat::Json)>
							"JSON"
						</button>
						<button class={tab_class(SourceFormat::Csv)} on:click=move |_| source.set(SourceFormat::Csv)>
							"CSV"
						</button>
					</nav>

					<NoticeBar notice=notice />

					{move || match source.get() {
						SourceFormat::Json => view! { <JsonLoader on_load=on_load notify=notify /> }.into_any(),
						SourceFormat::Csv => view! { <TabularLoader on_load=on_load notify=notify /> }.into_any(),
					}}

					<Show when=move || graph.with(Option::is_some)>
						<section class="dataset">
							<h2>"Current Dataset"</h2>
							<p class="badges">
								<span>{move || graph.with(|g| format!("{} nodes", g.as_ref().map_or(0, |g| g.nodes.len())))}</span>
								<span>{move || graph.with(|g| format!("{} edges", g.as_ref().map_or(0, |g| g.edges.len())))}</span>
							</p>
							<p class="muted">
								"Types: "
								{move || graph.with(|g| g.as_ref().map(|g| g.node_types().join(", ")).unwrap_or_default())}
							</p>
							<button on:click=on_export>"Export Data"</button>
							<button on:click=on_clear>"Clear Data"</button>
						</section>
					</Show>
				</div>
			</div>
		</ErrorBoundary>
	}
}
