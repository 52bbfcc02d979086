//! The imperative entry point: build a menu from page input and mount it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{Level, LevelFilter};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

use super::component::ForceMenuCanvas;
use super::controller::MenuController;
use super::error::MenuError;
use super::graph::MenuGraph;
use super::normalize::normalize;
use super::options::{ForceMenuOptions, Viewport};
use super::state::ForceMenuState;
use super::types::NavigationInput;

/// A mounted navigation menu.
///
/// The view stays mounted for the life of the page. Dropping this handle only
/// gives up the ability to toggle it.
pub struct ForceMenu {
	controller: MenuController,
}

impl ForceMenu {
	/// Build the menu graph from `input` and mount it, hidden, into
	/// `options.container`.
	///
	/// Fails only when the page cannot draw to a 2D canvas. An unknown
	/// container falls back to the document body.
	pub fn new(input: NavigationInput, options: ForceMenuOptions) -> Result<Self, MenuError> {
		let verbosity = options.log_level;
		menu_log!(verbosity, Level::Debug, "force-menu: initializing");

		let window = web_sys::window().ok_or(MenuError::RenderingUnavailable("no window"))?;
		let document = window
			.document()
			.ok_or(MenuError::RenderingUnavailable("no document"))?;
		ensure_canvas_support(&document)?;
		let container = resolve_container(&document, &options.container, verbosity)?;

		let viewport = viewport_of(&window);
		let resolved = options.resolve(viewport);
		let entries = normalize(input, &document, verbosity);
		let graph = MenuGraph::build(entries, &document.title(), viewport, &resolved);
		menu_log!(
			verbosity,
			Level::Info,
			"force-menu: built {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);

		let controller = MenuController::new(ForceMenuState::new(graph, resolved, viewport));
		let mounted = controller.clone();
		leptos::mount::mount_to(container, move || view! { <ForceMenuCanvas controller=mounted /> })
			.forget();

		Ok(Self { controller })
	}

	/// Show the menu and restart the simulation.
	pub fn show(&self) {
		self.controller.show();
	}

	/// Hide the menu and stop the simulation.
	pub fn hide(&self) {
		self.controller.hide();
	}

	/// Whether the menu is currently shown.
	pub fn is_visible(&self) -> bool {
		self.controller.is_visible()
	}

	/// The show/hide handle shared with the mounted view.
	pub fn controller(&self) -> &MenuController {
		&self.controller
	}

	/// Shared simulation state, for hosts that want to inspect positions.
	pub fn state(&self) -> Rc<RefCell<ForceMenuState>> {
		self.controller.state()
	}
}

fn ensure_canvas_support(document: &Document) -> Result<(), MenuError> {
	let has_context = js_sys::Reflect::has(
		&js_sys::global(),
		&JsValue::from_str("CanvasRenderingContext2D"),
	)
	.unwrap_or(false);
	if !has_context {
		return Err(MenuError::RenderingUnavailable(
			"CanvasRenderingContext2D is not defined",
		));
	}

	let probe: HtmlCanvasElement = document
		.create_element("canvas")
		.ok()
		.and_then(|el| el.dyn_into().ok())
		.ok_or(MenuError::RenderingUnavailable("cannot create canvas"))?;
	match probe.get_context("2d") {
		Ok(Some(_)) => Ok(()),
		_ => Err(MenuError::RenderingUnavailable("2d canvas context unsupported")),
	}
}

fn resolve_container(
	document: &Document,
	selector: &str,
	verbosity: LevelFilter,
) -> Result<HtmlElement, MenuError> {
	let found = match document.query_selector(selector) {
		Ok(Some(el)) => el.dyn_into::<HtmlElement>().ok(),
		Ok(None) => None,
		Err(e) => {
			menu_log!(
				verbosity,
				Level::Warn,
				"force-menu: invalid container selector {:?}: {:?}",
				selector,
				e
			);
			None
		}
	};
	if let Some(container) = found {
		return Ok(container);
	}
	menu_log!(
		verbosity,
		Level::Warn,
		"force-menu: container {:?} not found, mounting into body",
		selector
	);
	document
		.body()
		.ok_or(MenuError::RenderingUnavailable("no document body"))
}

fn viewport_of(window: &Window) -> Viewport {
	let width = window
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(800.0);
	let height = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(600.0);
	Viewport::new(width, height)
}
