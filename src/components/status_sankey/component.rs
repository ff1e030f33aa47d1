use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::DiagramConfig;
use super::render;
use super::state::SankeyState;
use super::types::TeamRecord;

struct Surface {
	state: SankeyState,
	ctx: CanvasRenderingContext2d,
}

impl Surface {
	fn redraw(&self) {
		render::render(&self.state, &self.ctx);
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Team/status flow diagram drawn on a canvas, cross-highlighting on hover.
#[component]
pub fn StatusSankey(
	/// Team records, one team node each.
	#[prop(into)]
	records: Signal<Vec<TeamRecord>>,
	/// Sizing and styling; defaults when omitted.
	#[prop(optional)]
	config: DiagramConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface: Rc<RefCell<Option<Surface>>> = Rc::new(RefCell::new(None));
	let outside_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (surface_init, outside_cb_init) = (surface.clone(), outside_cb.clone());
	let (canvas_w, canvas_h) = config.canvas_size();

	Effect::new(move |_| {
		let records = records.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(canvas_w as u32);
		canvas.set_height(canvas_h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable");
			return;
		};
		let s = Surface {
			state: SankeyState::new(&records, config.clone()),
			ctx,
		};
		s.redraw();
		*surface_init.borrow_mut() = Some(s);

		if outside_cb_init.borrow().is_some() {
			return;
		}
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			error!("document unavailable, outside clicks will not clear focus");
			return;
		};
		let (surface_out, canvas_out) = (surface_init.clone(), canvas.clone());
		*outside_cb_init.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let inside = ev
				.target()
				.and_then(|t| t.dyn_into::<web_sys::Node>().ok())
				.is_some_and(|node| canvas_out.contains(Some(&node)));
			if inside {
				return;
			}
			if let Some(ref mut s) = *surface_out.borrow_mut() {
				s.state.outside_click();
				s.redraw();
			}
		}));
		if let Some(ref cb) = *outside_cb_init.borrow() {
			let _ = document.add_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref());
		}
	});

	let surface_mm = surface.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);

		if let Some(ref mut s) = *surface_mm.borrow_mut() {
			s.state.pointer_moved(x, y);
			s.redraw();
		}
	};

	// the document listener outlives the canvas unless removed here
	let teardown = SendWrapper::new((outside_cb.clone(), surface.clone()));
	on_cleanup(move || {
		let (outside_cb, surface) = &*teardown;
		if let Some(cb) = outside_cb.borrow_mut().take() {
			if let Some(document) = web_sys::window().and_then(|w| w.document()) {
				let _ = document.remove_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref());
			}
		}
		surface.borrow_mut().take();
	});

	let surface_ml = surface.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *surface_ml.borrow_mut() {
			s.state.pointer_left();
			s.redraw();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="status-sankey-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}
