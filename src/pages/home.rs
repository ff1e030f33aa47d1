use leptos::prelude::*;

use crate::components::status_sankey::{
	StatusSankey, TeamRecord, average_percentage, build_graph, format_count, load_config,
	load_records,
};

/// Header figures shown above the diagram.
#[derive(Clone, Debug, PartialEq)]
struct Summary {
	teams: usize,
	items: i64,
	completed: i64,
	partial: i64,
	not_begun: i64,
}

impl Summary {
	fn from_records(records: &[TeamRecord]) -> Self {
		Self {
			teams: records.len(),
			items: build_graph(records).grand_total(),
			completed: average_percentage(records, |r| r.completed),
			partial: average_percentage(records, |r| r.partial),
			not_begun: average_percentage(records, |r| r.not_begun),
		}
	}
}

/// Dashboard page: average completion header plus the flow diagram.
#[component]
pub fn Home() -> impl IntoView {
	let records = RwSignal::new(load_records());
	let config = load_config();
	let summary = Memo::new(move |_| Summary::from_records(&records.get()));

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

			<div class="status-dashboard">
				<header class="status-summary">
					<h1>"Team Status Flow"</h1>
					<p class="subtitle">
						{move || {
							let s = summary.get();
							format!("{} teams, {} items", s.teams, format_count(s.items))
						}}
					</p>
					<ul class="averages">
						<li>"Completed: " {move || format!("{}%", summary.get().completed)}</li>
						<li>"Partial: " {move || format!("{}%", summary.get().partial)}</li>
						<li>"Not begun: " {move || format!("{}%", summary.get().not_begun)}</li>
					</ul>
				</header>
				<StatusSankey records=records config=config />
			</div>
		</ErrorBoundary>
	}
}
