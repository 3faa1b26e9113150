use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{ForceGraphState, PointerState};
use crate::components::info_panel::InfoPanel;
use crate::graph::{EngineEvent, GraphModel, InteractionBridge, PanelContent, RenderEngine, Theme};

type Bridge = InteractionBridge<ForceGraphState>;

/// Pointer travel below which a press and release counts as a click.
const CLICK_SLOP: f64 = 3.0;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Ends any press in progress, firing a click if the pointer barely moved.
fn release_pointer(b: &mut Bridge, click: bool) {
	let pointer = b.engine_mut().pointer.take();
	b.engine_mut().pan.active = false;
	if let Some(p) = pointer {
		b.handle(EngineEvent::DragEnd(p.node));
		if click && !p.moved {
			b.handle(EngineEvent::Click(p.node));
		}
	}
}

#[component]
pub fn ForceGraphCanvas(
	model: Rc<GraphModel>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let panel = RwSignal::new(None::<PanelContent>);
	let bridge: Rc<RefCell<Option<Bridge>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (bridge_init, animate_init, resize_cb_init) =
		(bridge.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window, graph not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas 2d context unavailable, graph not started");
			return;
		};
		let state = ForceGraphState::new(&model, w, h, panel);
		*bridge_init.borrow_mut() =
			Some(InteractionBridge::new(model.clone(), Theme::default(), state));

		if fullscreen {
			let (bridge_resize, canvas_resize) = (bridge_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut b) = *bridge_resize.borrow_mut() {
					b.engine_mut().resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let last_frame = Cell::new(js_sys::Date::now());
		let (bridge_anim, animate_inner) = (bridge_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame.replace(now)) / 1000.0).clamp(0.0, 0.05) as f32;
			if let Some(ref mut b) = *bridge_anim.borrow_mut() {
				let s = b.engine_mut();
				s.tick(dt);
				render::render(s, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let bridge_md = bridge.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let mut guard = bridge_md.borrow_mut();
		let Some(b) = guard.as_mut() else {
			return;
		};
		let s = b.engine_mut();
		if let Some(node) = s.node_at_position(x, y) {
			let (node_start_x, node_start_y) = s.node_position(node);
			s.pointer = Some(PointerState {
				node,
				start_x: x,
				start_y: y,
				node_start_x,
				node_start_y,
				moved: false,
			});
			b.handle(EngineEvent::DragStart(node));
		} else if s.zoom_enabled {
			s.pan.active = true;
			s.pan.start_x = x;
			s.pan.start_y = y;
			s.pan.transform_start_x = s.transform.x;
			s.pan.transform_start_y = s.transform.y;
		}
	};

	let bridge_mm = bridge.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let mut guard = bridge_mm.borrow_mut();
		let Some(b) = guard.as_mut() else {
			return;
		};
		let s = b.engine_mut();

		if let Some(p) = s.pointer.as_mut() {
			let (dx, dy) = (x - p.start_x, y - p.start_y);
			p.moved |= dx.hypot(dy) >= CLICK_SLOP;
			let (node, k) = (p.node, s.transform.k);
			let (nx, ny) = (p.node_start_x + dx / k, p.node_start_y + dy / k);
			b.handle(EngineEvent::DragMove { node, x: nx, y: ny });
			return;
		}

		if s.pan.active && s.zoom_enabled {
			s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
			s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
		}

		let hit = s.node_at_position(x, y);
		let previous = std::mem::replace(&mut s.hovered, hit);
		if previous != hit {
			if let Some(old) = previous {
				b.handle(EngineEvent::HoverExit(old));
			}
			if let Some(new) = hit {
				b.handle(EngineEvent::HoverEnter(new));
			}
		}
	};

	let bridge_mu = bridge.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut b) = *bridge_mu.borrow_mut() {
			release_pointer(b, true);
		}
	};

	let bridge_ml = bridge.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut b) = *bridge_ml.borrow_mut() {
			release_pointer(b, false);
			if let Some(old) = b.engine_mut().hovered.take() {
				b.handle(EngineEvent::HoverExit(old));
			}
		}
	};

	let bridge_wh = bridge.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut b) = *bridge_wh.borrow_mut() {
			let s = b.engine_mut();
			if !s.zoom_enabled {
				return;
			}
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	let bridge_pe = bridge.clone();
	let on_panel_enter = move |_: MouseEvent| {
		if let Some(ref mut b) = *bridge_pe.borrow_mut() {
			b.handle(EngineEvent::PanelPointerEnter);
		}
	};

	let bridge_pl = bridge.clone();
	let on_panel_leave = move |_: MouseEvent| {
		if let Some(ref mut b) = *bridge_pl.borrow_mut() {
			b.handle(EngineEvent::PanelPointerLeave);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div
			class="info-panel"
			class:hidden=move || panel.with(Option::is_none)
			on:mouseenter=on_panel_enter
			on:mouseleave=on_panel_leave
		>
			{move || panel.get().map(|content| view! { <InfoPanel content=content /> })}
		</div>
	}
}
