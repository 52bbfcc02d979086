//! Leptos component that mounts the menu overlay and canvas.
//!
//! The component sizes the canvas to the viewport and wires up mouse handlers
//! for dragging and clicking nodes with the primary button. An animation loop runs via
//! `requestAnimationFrame`. While the menu is visible, each frame steps the
//! simulation and redraws.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::controller::{MenuController, display_value};
use super::render;
use super::state::Activation;

/// Simulated seconds per animation frame.
const FRAME_DT: f32 = 0.016;

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Follow a node click: hide first when asked, then hand the URL to the browser.
fn navigate(controller: &MenuController, activation: Activation, verbosity: LevelFilter) {
	if activation.hide_first {
		controller.hide();
	}
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Err(e) = window.location().assign(&activation.url) {
		menu_log!(
			verbosity,
			Level::Warn,
			"force-menu: navigation to {:?} failed: {:?}",
			activation.url,
			e
		);
	}
}

/// Renders the menu overlay and canvas for `controller`'s state.
///
/// Mount this once per controller. Both elements start hidden and follow
/// [`MenuController::show`] and [`MenuController::hide`].
#[component]
pub fn ForceMenuCanvas(
	/// Visibility and simulation to draw.
	controller: MenuController,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = controller.state();
	let visible = controller.visible_signal();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, visible_init) = (state.clone(), animate.clone(), visible.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (viewport, verbosity) = {
			let s = state_init.borrow();
			(s.viewport, s.options.log_level)
		};
		canvas.set_width(viewport.width as u32);
		canvas.set_height(viewport.height as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					menu_log!(verbosity, Level::Error, "force-menu: canvas context is not 2d");
					return;
				}
			},
			_ => {
				menu_log!(verbosity, Level::Error, "force-menu: canvas 2d context unavailable");
				return;
			}
		};

		let (state_anim, animate_inner, visible_anim) =
			(state_init.clone(), animate_init.clone(), visible_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if visible_anim.get_untracked() {
				let mut s = state_anim.borrow_mut();
				s.step(FRAME_DT);
				render::render(&s, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), animate_init.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			state_md.borrow_mut().press(x, y, ev.button());
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			state_mm.borrow_mut().drag_to(x, y);
		}
	};

	let (state_mu, controller_mu) = (state.clone(), controller.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let (activation, verbosity) = {
			let mut s = state_mu.borrow_mut();
			(s.release(ev.button()), s.options.log_level)
		};
		if let Some(activation) = activation {
			navigate(&controller_mu, activation, verbosity);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().cancel_drag();
	};

	let (overlay_visible, canvas_visible) = (visible.clone(), visible);

	view! {
		<div
			class="svg-container"
			style:display=move || display_value(overlay_visible.get())
		/>
		<canvas
			node_ref=canvas_ref
			class="force-menu-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style:display=move || display_value(canvas_visible.get())
			style:cursor="pointer"
		/>
	}
}
