use std::sync::Arc;

use leptos::prelude::*;
use log::error;

use crate::components::network_graph::NetworkGraphCanvas;
use crate::components::search::SearchBox;
use crate::data::search::search;
use crate::data::{EntityId, Repository, sample_repository};

fn load_repository() -> Arc<Repository> {
	sample_repository().unwrap_or_else(|err| {
		error!("could not load the professionals dataset: {err}");
		Arc::new(Repository::default())
	})
}

/// Network explorer: profile header, search and the diagram.
#[component]
pub fn Home() -> impl IntoView {
	let repository = load_repository();
	let first = repository.entities().first().map(|e| e.id.clone());
	let repository = Signal::stored(repository);

	let selected = RwSignal::new(first);
	let query = RwSignal::new(String::new());
	let results = Memo::new(move |_| query.with(|q| repository.with(|repo| search(repo, q))));
	let on_select = Callback::new(move |id: EntityId| selected.set(Some(id)));

	let profile = move || {
		let repo = repository.get();
		selected.get().and_then(|id| repo.get(&id).cloned()).map(|entity| {
			let subtitle = match entity.workplaces.first() {
				Some(workplace) => format!("{} · {workplace}", entity.category),
				None => entity.category.clone(),
			};
			view! {
				<div class="profile">
					<div class="profile-avatar">{entity.glyph()}</div>
					<div>
						<h1>{entity.name}</h1>
						<p class="subtitle">{subtitle}</p>
						<p class="muted">
							{format!(
								"{} connections · {} years experience",
								entity.connections.len(),
								entity.years_experience,
							)}
						</p>
					</div>
				</div>
			}
		})
	};

	view! {
		<div class="explorer">
			<header class="explorer-header">
				{profile}
				<SearchBox
					query=query
					results=results
					repository=repository
					on_select=on_select
				/>
			</header>
			<main class="explorer-graph">
				<NetworkGraphCanvas
					repository=repository
					focal=selected
					query=query
					highlighted=results
					on_select=on_select
				/>
			</main>
		</div>
	}
}
