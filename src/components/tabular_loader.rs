use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{Event, MouseEvent};

use super::file_io::{read_text, selected_file};
use super::notice::Notice;
use crate::network::ingest::{SourceFormat, check_file_name, read_table, suggest_mapping, table_to_graph};
use crate::network::{ColumnChoice, ColumnMapping, ColumnRole, GraphModel, Table, samples};

/// Data rows shown under the mapping controls.
const PREVIEW_ROWS: usize = 10;

/// CSV text from a file or the textarea, mapped onto graph roles.
#[component]
pub fn TabularLoader(
	#[prop(into)] on_load: Callback<GraphModel>,
	#[prop(into)] notify: Callback<Notice>,
) -> impl IntoView {
	let text = RwSignal::new(String::new());
	let table = RwSignal::new(Table::new());
	let mapping = RwSignal::new(ColumnMapping::default());

	let on_file = move |ev: Event| {
		let Some(file) = selected_file(&ev) else {
			return;
		};
		if let Err(e) = check_file_name(&file.name(), SourceFormat::Csv) {
			notify.run(Notice::error(e));
			return;
		}
		spawn_local(async move {
			match read_text(&file).await {
				Ok(content) => {
					text.set(content);
					notify.run(Notice::success(format!(
						"CSV file \"{}\" loaded successfully",
						file.name()
					)));
				}
				Err(e) => notify.run(Notice::error(e)),
			}
		});
	};

	let on_parse = move |_: MouseEvent| match read_table(&text.get_untracked()) {
		Ok(parsed) => {
			notify.run(Notice::success(format!("Parsed {} rows", parsed.len())));
			mapping.set(suggest_mapping(&parsed));
			table.set(parsed);
		}
		Err(e) => notify.run(Notice::error(e)),
	};

	let on_sample = move |_: MouseEvent| {
		text.set(samples::SAMPLE_CSV.to_owned());
		notify.run(Notice::success("Sample CSV data loaded"));
	};

	let on_convert = move |_: MouseEvent| {
		let result = table.with_untracked(|t| mapping.with_untracked(|m| table_to_graph(t, m)));
		match result {
			Ok(report) => {
				let mut message = format!(
					"Created network with {} nodes and {} edges",
					report.graph.nodes.len(),
					report.graph.edges.len()
				);
				if let Some(summary) = report.warning_summary() {
					message.push_str(&format!(" ({summary})"));
				}
				notify.run(Notice::success(message));
				on_load.run(report.graph);
			}
			Err(e) => notify.run(Notice::error(e)),
		}
	};

	let has_table = move || table.with(|t| !t.is_empty());
	let headers = move || table.with(|t| t.first().cloned().unwrap_or_default());

	view! {
		<section class="loader">
			<h2>"Tabular Data Parser"</h2>
			<input type="file" accept={SourceFormat::Csv.accept()} on:change=on_file />
			<textarea
				rows="8"
				class="mono"
				placeholder="source,target,weight,label"
				prop:value=move || text.get()
				on:input=move |ev| text.set(event_target_value(&ev))
			/>
			<button on:click=on_parse>"Parse CSV"</button>
			<button on:click=on_sample>"Load Sample"</button>
		</section>

		<Show when=has_table>
			<section class="loader">
				<h2>"Column Mapping"</h2>
				<div class="mapping">
					{ColumnRole::ALL
						.into_iter()
						.map(|role| view! { <RoleSelect role=role mapping=mapping headers={Signal::derive(headers)} /> })
						.collect_view()}
				</div>
				<button on:click=on_convert>"Convert to Network"</button>
			</section>

			<section class="loader">
				<h2>"Data Preview"</h2>
				<p class="badges">
					<span>{move || format!("{} rows", table.with(Vec::len))}</span>
					<span>{move || format!("{} columns", headers().len())}</span>
				</p>
				<table class="preview">
					<thead>
						<tr>
							{move || headers().into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
						</tr>
					</thead>
					<tbody>
						{move || {
							table
								.with(|t| t.iter().skip(1).take(PREVIEW_ROWS).cloned().collect::<Vec<_>>())
								.into_iter()
								.map(|row| {
									view! {
										<tr>
											{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
										</tr>
									}
								})
								.collect_view()
						}}
					</tbody>
				</table>
				{move || {
					let extra = table.with(Vec::len).saturating_sub(PREVIEW_ROWS + 1);
					(extra > 0).then(|| view! { <p class="muted">{format!("... and {extra} more rows")}</p> })
				}}
			</section>
		</Show>
	}
}

/// One role's column picker. Optional roles also offer "None".
#[component]
fn RoleSelect(
	role: ColumnRole,
	mapping: RwSignal<ColumnMapping>,
	headers: Signal<Vec<String>>,
) -> impl IntoView {
	let title = if role.is_mandatory() {
		format!("{} column *", capitalize(&role.to_string()))
	} else {
		format!("{} column", capitalize(&role.to_string()))
	};
	let on_change = move |ev: Event| {
		let value = event_target_value(&ev);
		mapping.update(|m| match ColumnChoice::from_select(&value) {
			Some(choice) => m.set_role(role, choice),
			None => m.clear_role(role),
		});
	};

	view! {
		<label>
			{title}
			<select on:change=on_change prop:value=move || mapping.with(|m| m.select_value(role))>
				<option value="">{format!("Select {role}")}</option>
				{(!role.is_mandatory()).then(|| view! {
					<option value={ColumnChoice::NONE_VALUE}>"None"</option>
				})}
				{move || {
					let selected = mapping.with(|m| m.select_value(role));
					headers
						.get()
						.into_iter()
						.map(|h| {
							let value = ColumnChoice::Header(h.clone()).as_select();
							let is_selected = value == selected;
							view! { <option value=value selected=is_selected>{h}</option> }
						})
						.collect_view()
				}}
			</select>
		</label>
	}
}

fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	chars
		.next()
		.map(|c| c.to_uppercase().chain(chars).collect())
		.unwrap_or_default()
}
