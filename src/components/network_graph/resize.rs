//! Surface measurement and the scoped browser resources behind the canvas:
//! resize observation with a bounded retry, window listeners and the
//! animation-frame loop. Every handle here releases its registration when
//! dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, ResizeObserver, Window};

use super::config::GraphConfig;
use super::controller::GraphController;
use super::resolve::SurfaceRect;
use super::surface::Viewport;
use crate::error::Result;

/// Controller shared between the component's effects and event handlers.
pub type SharedController = Rc<RefCell<Option<GraphController>>>;

/// Client-space bounding box of the canvas.
pub fn surface_rect(canvas: &HtmlCanvasElement) -> SurfaceRect {
	let rect = canvas.get_bounding_client_rect();
	SurfaceRect {
		left: rect.left(),
		top: rect.top(),
		width: rect.width(),
		height: rect.height(),
	}
}

/// Logical size of the canvas, `None` while it has no layout box yet.
pub fn measure(canvas: &HtmlCanvasElement, window: &Window) -> Option<Viewport> {
	let rect = surface_rect(canvas);
	Viewport::measured(rect.width, rect.height, window.device_pixel_ratio())
}

fn size_backing_store(canvas: &HtmlCanvasElement, viewport: &Viewport) {
	let (width, height) = viewport.backing_size();
	if canvas.width() != width {
		canvas.set_width(width);
	}
	if canvas.height() != height {
		canvas.set_height(height);
	}
}

struct Resizer {
	canvas: HtmlCanvasElement,
	window: Window,
	controller: Weak<RefCell<Option<GraphController>>>,
	retry: RefCell<Option<Timeout>>,
	config: GraphConfig,
}

impl Resizer {
	fn remeasure(self: &Rc<Self>, attempt: u32) {
		match measure(&self.canvas, &self.window) {
			Some(viewport) => {
				self.retry.borrow_mut().take();
				size_backing_store(&self.canvas, &viewport);
				if let Some(shared) = self.controller.upgrade() {
					if let Some(ref mut c) = *shared.borrow_mut() {
						c.resize(viewport);
					}
				}
			}
			None if attempt < self.config.resize_retry_limit => {
				let delay = self.config.retry_delay(attempt);
				debug!("surface has no size yet, retry {} in {delay}ms", attempt + 1);
				let weak = Rc::downgrade(self);
				let timeout = Timeout::new(delay, move || {
					if let Some(resizer) = weak.upgrade() {
						resizer.remeasure(attempt + 1);
					}
				});
				*self.retry.borrow_mut() = Some(timeout);
			}
			None => warn!("surface still has no size after {attempt} retries"),
		}
	}

	fn cancel(&self) {
		self.retry.borrow_mut().take();
	}
}

/// A listener on the window, removed on drop.
pub struct WindowListener {
	window: Window,
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	/// Register `f` for `event` on `window`.
	pub fn add(window: &Window, event: &'static str, f: impl FnMut() + 'static) -> Result<Self> {
		let callback = Closure::<dyn FnMut()>::new(f);
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			window: window.clone(),
			event,
			callback,
		})
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Keeps the canvas backing store matched to its CSS size and the device
/// pixel ratio, and tells the controller about every new size.
pub struct ResizeWatch {
	resizer: Rc<Resizer>,
	observer: Option<ResizeObserver>,
	_on_observe: Closure<dyn FnMut()>,
	_listeners: Vec<WindowListener>,
}

impl ResizeWatch {
	/// Start watching `canvas` and measure it once right away.
	pub fn attach(
		canvas: &HtmlCanvasElement,
		window: &Window,
		controller: &SharedController,
		config: &GraphConfig,
	) -> Result<Self> {
		let resizer = Rc::new(Resizer {
			canvas: canvas.clone(),
			window: window.clone(),
			controller: Rc::downgrade(controller),
			retry: RefCell::new(None),
			config: config.clone(),
		});

		let weak = Rc::downgrade(&resizer);
		let on_observe = Closure::<dyn FnMut()>::new(move || {
			if let Some(resizer) = weak.upgrade() {
				resizer.remeasure(0);
			}
		});
		let observer = match ResizeObserver::new(on_observe.as_ref().unchecked_ref()) {
			Ok(observer) => {
				observer.observe(canvas);
				Some(observer)
			}
			Err(err) => {
				warn!("ResizeObserver unavailable, falling back to window events: {err:?}");
				None
			}
		};

		// DPR changes (browser zoom, moving between screens) and rotation
		// don't always change the canvas' CSS box.
		let listeners = ["resize", "orientationchange"]
			.into_iter()
			.map(|event| {
				let weak = Rc::downgrade(&resizer);
				WindowListener::add(window, event, move || {
					if let Some(resizer) = weak.upgrade() {
						resizer.remeasure(0);
					}
				})
			})
			.collect::<Result<Vec<_>>>()?;

		resizer.remeasure(0);

		Ok(Self {
			resizer,
			observer,
			_on_observe: on_observe,
			_listeners: listeners,
		})
	}
}

impl Drop for ResizeWatch {
	fn drop(&mut self) {
		if let Some(observer) = &self.observer {
			observer.disconnect();
		}
		self.resizer.cancel();
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop calling `tick` once per frame until dropped.
pub struct FrameLoop {
	window: Window,
	handle: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl FrameLoop {
	/// Schedule the first frame.
	pub fn start(window: &Window, mut tick: impl FnMut() + 'static) -> Result<Self> {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(None));
		let (callback_inner, handle_inner, window_inner) =
			(callback.clone(), handle.clone(), window.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			tick();
			if let Some(ref cb) = *callback_inner.borrow() {
				handle_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		if let Some(ref cb) = *callback.borrow() {
			handle.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
		}

		Ok(Self {
			window: window.clone(),
			handle,
			callback,
		})
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// breaks the closure's reference to itself
		self.callback.borrow_mut().take();
	}
}
