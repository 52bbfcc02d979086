//! force-menu: site navigation as an interactive force-directed graph.
//!
//! This crate provides a WASM widget that lays a page's navigation links out
//! around a root node for the current page. Nodes can be dragged, clicking one
//! navigates to it, and the whole menu can be shown and hidden on demand.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_menu::{
	ForceMenu, ForceMenuCanvas, ForceMenuOptions, MenuController, MenuError, NavigationData,
	NavigationEntry, NavigationInput,
};

/// Script element holding a JSON navigation data set.
pub const DATA_SCRIPT_ID: &str = "force-menu-data";

/// Script element holding JSON menu options.
pub const OPTIONS_SCRIPT_ID: &str = "force-menu-options";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("force-menu: logging initialized");
}

fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load navigation data from a script element with id="force-menu-data".
/// Expected format: JSON with { nodes: [{ name, group?, url? }, ...] }
pub fn load_navigation_data() -> Result<Option<NavigationData>, MenuError> {
	let Some(json_text) = script_text(DATA_SCRIPT_ID) else {
		return Ok(None);
	};
	let data: NavigationData = serde_json::from_str(&json_text).map_err(MenuError::InvalidData)?;
	info!("force-menu: loaded {} navigation entries", data.nodes.len());
	Ok(Some(data))
}

/// Load options from a script element with id="force-menu-options".
pub fn load_options() -> Result<Option<ForceMenuOptions>, MenuError> {
	script_text(OPTIONS_SCRIPT_ID)
		.map(|json_text| ForceMenuOptions::from_json(&json_text))
		.transpose()
}

/// Build a menu from the page: embedded data if present, else the site nav.
fn open_menu() -> Result<ForceMenu, MenuError> {
	let input = match load_navigation_data()? {
		Some(data) => NavigationInput::Dataset(data),
		None => NavigationInput::Selector("nav.site-nav".into()),
	};
	let options = load_options()?.unwrap_or_default();
	ForceMenu::new(input, options)
}

/// Demo page: a plain site nav plus a button that opens it as a force menu.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let menu: Rc<RefCell<Option<ForceMenu>>> = Rc::new(RefCell::new(None));
	let on_toggle = move |_| {
		let mut slot = menu.borrow_mut();
		if let Some(menu) = slot.as_ref() {
			if menu.is_visible() {
				menu.hide();
			} else {
				menu.show();
			}
			return;
		}
		match open_menu() {
			Ok(menu) => {
				menu.show();
				*slot = Some(menu);
			}
			Err(e) => error!("{}", e),
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Force Menu" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<nav class="site-nav">
			<ul>
				<li><a href="#">"Home"</a></li>
				<li><a href="/about">"About"</a></li>
				<li><a href="/projects">"Projects"</a></li>
				<li><a href="/blog">"Blog"</a></li>
				<li><a href="/contact">"Contact"</a></li>
			</ul>
		</nav>
		<button class="force-menu-toggle" on:click=on_toggle>"Menu"</button>
	}
}
