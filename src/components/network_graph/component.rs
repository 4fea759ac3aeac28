use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

use super::config::GraphConfig;
use super::controller::{GraphController, Outcome};
use super::geometry::Point;
use super::palette::connection_color;
use super::resize::{FrameLoop, ResizeWatch, SharedController, surface_rect};
use super::state::{ConnectionDetail, Cursor, Tooltip, TooltipBody};
use crate::data::{ConnectionKind, EntityId, Repository};
use crate::error::{GraphError, Result};

/// Browser resources held while the canvas is mounted.
struct Mounted {
	_resize: ResizeWatch,
	_frames: FrameLoop,
}

fn mount(canvas: &HtmlCanvasElement, shared: &SharedController, config: &GraphConfig) -> Result<Mounted> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(GraphError::ContextUnavailable)?
		.dyn_into()
		.map_err(|_| GraphError::ContextUnavailable)?;

	let resize = ResizeWatch::attach(canvas, &window, shared, config)?;

	let state_frames = shared.clone();
	let frames = FrameLoop::start(&window, move || {
		if let Some(ref mut c) = *state_frames.borrow_mut() {
			if c.take_redraw() {
				if let Err(err) = c.render(&ctx) {
					warn!("render failed: {err}");
				}
			}
		}
	})?;

	Ok(Mounted {
		_resize: resize,
		_frames: frames,
	})
}

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: Cursor) {
	// the prelude's `ElementExt::style` shadows the DOM getter
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor.as_css());
}

fn set_if_changed<T>(signal: RwSignal<T>, value: T)
where
	T: PartialEq + Send + Sync + 'static,
{
	if signal.with_untracked(|current| *current != value) {
		signal.set(value);
	}
}

fn window_size() -> (f64, f64) {
	web_sys::window()
		.and_then(|w| {
			Some((
				w.inner_width().ok()?.as_f64()?,
				w.inner_height().ok()?.as_f64()?,
			))
		})
		.unwrap_or((1024.0, 768.0))
}

/// Radial diagram of `repository` centred on `focal`.
///
/// Clicking a node reports it through `on_select`; the parent decides whether
/// it becomes the new focal entity. Clicking an edge opens its detail modal,
/// which owns pointer input until closed.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] repository: Signal<Arc<Repository>>,
	#[prop(into)] focal: Signal<Option<EntityId>>,
	#[prop(into)] query: Signal<String>,
	#[prop(into)] highlighted: Signal<Vec<EntityId>>,
	#[prop(into)] on_select: Callback<EntityId>,
	#[prop(optional)] config: Option<GraphConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let shared: SharedController = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<Tooltip>);
	let pinned = RwSignal::new(None::<ConnectionDetail>);

	// Returning the guards keeps them alive until the effect re-runs or is
	// disposed, which releases every listener, observer and frame request.
	let shared_mount = shared.clone();
	Effect::new(move |prev: Option<Option<Mounted>>| {
		drop(prev);
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();

		let mut controller = GraphController::new(
			repository.get_untracked(),
			focal.get_untracked(),
			config.clone(),
		);
		controller.set_search(query.get_untracked(), highlighted.get_untracked());
		*shared_mount.borrow_mut() = Some(controller);

		match mount(&canvas, &shared_mount, &config) {
			Ok(mounted) => {
				debug!("network graph mounted");
				Some(mounted)
			}
			Err(err) => {
				warn!("network graph disabled: {err}");
				None
			}
		}
	});

	let shared_data = shared.clone();
	Effect::new(move |_| {
		let (repo, focal) = (repository.get(), focal.get());
		let synced = shared_data.borrow_mut().as_mut().map(|c| {
			c.set_data(repo, focal);
			(c.tooltip(), c.pinned_detail())
		});
		if let Some((tip, detail)) = synced {
			set_if_changed(tooltip, tip);
			set_if_changed(pinned, detail);
		}
	});

	let shared_search = shared.clone();
	Effect::new(move |_| {
		let (query, hits) = (query.get(), highlighted.get());
		if let Some(ref mut c) = *shared_search.borrow_mut() {
			c.set_search(query, hits);
		}
	});

	// The modal only clears `pinned`; this hands the dismissal back to the
	// controller.
	let shared_close = shared.clone();
	Effect::new(move |_| {
		if pinned.get().is_none() {
			if let Some(ref mut c) = *shared_close.borrow_mut() {
				c.dismiss_connection();
			}
		}
	});

	let dispatch = move |outcome: Outcome| match outcome {
		Outcome::Nothing => {}
		Outcome::EntitySelected(id) => {
			tooltip.set(None);
			on_select.run(id);
		}
		Outcome::ConnectionOpened(detail) => {
			tooltip.set(None);
			pinned.set(Some(detail));
		}
	};

	let shared_mm = shared.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = surface_rect(&canvas);
		let moved = shared_mm
			.borrow_mut()
			.as_mut()
			.map(|c| (c.pointer_move(client_point(&ev), &rect), c.tooltip()));
		if let Some((cursor, tip)) = moved {
			set_cursor(&canvas, cursor);
			set_if_changed(tooltip, tip);
		}
	};

	let shared_ml = shared.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *shared_ml.borrow_mut() {
			c.pointer_leave();
		}
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			set_cursor(&canvas, Cursor::Default);
		}
		set_if_changed(tooltip, None);
	};

	let shared_click = shared.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = surface_rect(&canvas);
		// bind first so the controller borrow ends before listeners run
		let outcome = shared_click
			.borrow_mut()
			.as_mut()
			.map(|c| c.click(client_point(&ev), &rect));
		if let Some(outcome) = outcome {
			dispatch(outcome);
		}
	};

	let shared_touch = shared.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = surface_rect(&canvas);
		let list = ev.touches();
		let touches: Vec<Point> = (0..list.length())
			.filter_map(|i| list.get(i))
			.map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
			.collect();
		let outcome = shared_touch
			.borrow_mut()
			.as_mut()
			.map(|c| c.touch_start(&touches, &rect));
		if let Some(outcome) = outcome {
			dispatch(outcome);
		}
	};

	view! {
		<div class="network-graph">
			<canvas
				node_ref=canvas_ref
				class="network-graph-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:touchstart=on_touchstart
			/>
			{move || tooltip.get().map(|tip| view! { <TooltipCard tip=tip /> })}
			{move || {
				pinned
					.get()
					.map(|detail| {
						view! {
							<ConnectionModal
								detail=detail
								on_close=Callback::new(move |_: ()| pinned.set(None))
							/>
						}
					})
			}}
			<Legend />
		</div>
	}
}

#[component]
fn TooltipCard(tip: Tooltip) -> impl IntoView {
	let (width, height) = window_size();
	let place = tip.placement(width, height);
	let style = format!(
		"left: {}px; top: {}px; transform: {};",
		place.left,
		place.top,
		if place.above { "translateY(-100%)" } else { "none" }
	);

	let body = match tip.body {
		TooltipBody::Entity {
			name,
			category,
			years_experience,
			workplace,
		} => view! {
			<h4 class="tooltip-title">{name}</h4>
			<p class="tooltip-category">{category}</p>
			<p class="muted">{format!("{years_experience} years experience")}</p>
			<p class="muted">{workplace.unwrap_or_default()}</p>
			<p class="hint">"Click to focus"</p>
		}
		.into_any(),
		TooltipBody::Connection {
			kind,
			description,
			strength,
		} => view! {
			<h4 class="tooltip-title">{kind.title()}" connection"</h4>
			<p>{description}</p>
			<p class="muted">{format!("Strength: {strength}/5")}</p>
			<p class="hint">"Click for details"</p>
		}
		.into_any(),
	};

	view! { <div class="graph-tooltip" style=style>{body}</div> }
}

#[component]
fn Party(glyph: String, name: String) -> impl IntoView {
	view! {
		<div class="graph-modal-party">
			<div class="graph-modal-avatar">{glyph}</div>
			<div class="graph-modal-name">{name}</div>
		</div>
	}
}

#[component]
fn ConnectionModal(detail: ConnectionDetail, on_close: Callback<()>) -> impl IntoView {
	let ConnectionDetail {
		connection,
		source,
		target,
	} = detail;
	let meter = format!(
		"width: {}%; background: {};",
		connection.strength.ratio() * 100.0,
		connection_color(connection.kind)
	);
	let details = connection
		.details
		.into_iter()
		.map(|d| view! { <li>{d}</li> })
		.collect_view();

	view! {
		<div class="graph-modal-backdrop">
			<div class="graph-modal" role="dialog">
				<div class="graph-modal-header">
					<h3>"Connection Details"</h3>
					<button class="graph-modal-close" on:click=move |_| on_close.run(())>
						"✕"
					</button>
				</div>
				<div class="graph-modal-parties">
					<Party glyph=source.glyph() name=source.name.clone() />
					<div class="graph-modal-link">
						<div class="muted">{connection.kind.label()}</div>
						<div class="meter">
							<div class="meter-fill" style=meter></div>
						</div>
						<div class="muted">
							{format!("Strength: {}/5", connection.strength.get())}
						</div>
					</div>
					<Party glyph=target.glyph() name=target.name.clone() />
				</div>
				<h4>"Description"</h4>
				<p>{connection.description}</p>
				<h4>"Details"</h4>
				<ul class="graph-modal-details">{details}</ul>
			</div>
		</div>
	}
}

#[component]
fn Legend() -> impl IntoView {
	let open = RwSignal::new(false);

	view! {
		<div class="graph-legend-anchor">
			<button
				class="graph-legend-toggle"
				title="Connection types"
				on:click=move |_| open.update(|o| *o = !*o)
			>
				"?"
			</button>
			<div class="graph-legend" class:open=move || open.get()>
				<h4>"Connection Types"</h4>
				{ConnectionKind::ALL
					.into_iter()
					.map(|kind| {
						view! {
							<div class="graph-legend-row">
								<span
									class="swatch"
									style=format!("background: {};", connection_color(kind))
								></span>
								<span>{kind.title()}</span>
							</div>
						}
					})
					.collect_view()}
			</div>
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn cursor_is_written_to_canvas_style() {
		let document = web_sys::window().unwrap().document().unwrap();
		let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();

		set_cursor(&canvas, Cursor::Pointer);
		let style = web_sys::HtmlElement::style(&canvas);
		assert_eq!(style.get_property_value("cursor").unwrap(), "pointer");

		set_cursor(&canvas, Cursor::Default);
		assert_eq!(style.get_property_value("cursor").unwrap(), "default");
	}
}
