//! Search box with a dropdown of matching entities.

use std::sync::Arc;

use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::data::{EntityId, Repository};

/// Next highlighted row after an arrow key. Down stops at the last row; up
/// from the first row leaves the list.
fn step_highlight(current: Option<usize>, len: usize, down: bool) -> Option<usize> {
	match (current, down) {
		_ if len == 0 => None,
		(None, true) => Some(0),
		(Some(i), true) => Some((i + 1).min(len - 1)),
		(None, false) | (Some(0), false) => None,
		(Some(i), false) => Some((i - 1).min(len - 1)),
	}
}

/// Text input bound to `query`, listing `results` underneath.
///
/// Arrow keys move the highlighted row, Enter picks it, Escape clears the
/// query.
#[component]
pub fn SearchBox(
	query: RwSignal<String>,
	#[prop(into)] results: Signal<Vec<EntityId>>,
	#[prop(into)] repository: Signal<Arc<Repository>>,
	#[prop(into)] on_select: Callback<EntityId>,
) -> impl IntoView {
	let highlighted = RwSignal::new(None::<usize>);

	let pick = move |id: EntityId| {
		highlighted.set(None);
		query.set(String::new());
		on_select.run(id);
	};

	let on_keydown = move |ev: KeyboardEvent| {
		let len = results.with_untracked(Vec::len);
		if len == 0 {
			return;
		}
		match ev.key().as_str() {
			key @ ("ArrowDown" | "ArrowUp") => {
				ev.prevent_default();
				let down = key == "ArrowDown";
				highlighted.update(|h| *h = step_highlight(*h, len, down));
			}
			"Enter" => {
				ev.prevent_default();
				let chosen = highlighted
					.get_untracked()
					.and_then(|i| results.with_untracked(|r| r.get(i).cloned()));
				if let Some(id) = chosen {
					pick(id);
				}
			}
			"Escape" => {
				highlighted.set(None);
				query.set(String::new());
			}
			_ => {}
		}
	};

	let rows = move || {
		let repo = repository.get();
		results
			.get()
			.into_iter()
			.filter_map(|id| repo.get(&id).cloned())
			.enumerate()
			.map(|(i, entity)| {
				let id = entity.id.clone();
				view! {
					<li
						class="search-result"
						class:active=move || highlighted.get() == Some(i)
						on:mousedown=move |_| pick(id.clone())
						on:mouseenter=move |_| highlighted.set(Some(i))
					>
						<span class="search-result-name">{entity.name}</span>
						<span class="search-result-category">{entity.category}</span>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<div class="search-box">
			<input
				type="search"
				placeholder="Search by name, specialty, workplace or research area"
				prop:value=move || query.get()
				on:input=move |ev| {
					highlighted.set(None);
					query.set(event_target_value(&ev));
				}
				on:keydown=on_keydown
			/>
			<Show when=move || !results.with(Vec::is_empty)>
				<ul class="search-results">{rows}</ul>
			</Show>
		</div>
	}
}
