//! Show/hide control shared between the mounted view and the caller.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use super::state::ForceMenuState;

/// CSS `display` value for the overlay and canvas.
pub fn display_value(visible: bool) -> &'static str {
	if visible { "inline" } else { "none" }
}

/// Cheap handle to one menu's visibility and simulation.
///
/// Both transitions are synchronous and idempotent. Do not call them while
/// holding a borrow of [`MenuController::state`].
#[derive(Clone)]
pub struct MenuController {
	visible: ArcRwSignal<bool>,
	state: Rc<RefCell<ForceMenuState>>,
}

impl MenuController {
	/// Wrap `state`. The menu starts hidden with the simulation stopped.
	pub fn new(state: ForceMenuState) -> Self {
		Self {
			visible: ArcRwSignal::new(false),
			state: Rc::new(RefCell::new(state)),
		}
	}

	/// Display the menu and restart the simulation.
	pub fn show(&self) {
		self.visible.set(true);
		self.state.borrow_mut().start();
	}

	/// Hide the menu and stop the simulation.
	pub fn hide(&self) {
		self.visible.set(false);
		self.state.borrow_mut().stop();
	}

	/// Current visibility, read without tracking.
	pub fn is_visible(&self) -> bool {
		self.visible.get_untracked()
	}

	/// Shared simulation state.
	pub fn state(&self) -> Rc<RefCell<ForceMenuState>> {
		self.state.clone()
	}

	pub(super) fn visible_signal(&self) -> ArcRwSignal<bool> {
		self.visible.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_menu::graph::MenuGraph;
	use crate::components::force_menu::options::{ForceMenuOptions, Viewport};
	use crate::components::force_menu::types::NavigationEntry;

	fn controller() -> MenuController {
		let viewport = Viewport::new(640.0, 480.0);
		let options = ForceMenuOptions::default().resolve(viewport);
		let menu = MenuGraph::build(
			vec![NavigationEntry::new("Home", "#"), NavigationEntry::new("About", "/about")],
			"Site",
			viewport,
			&options,
		);
		MenuController::new(ForceMenuState::new(menu, options, viewport))
	}

	#[test]
	fn starts_hidden() {
		let c = controller();
		assert!(!c.is_visible());
		assert!(!c.state().borrow().is_running());
		assert_eq!(display_value(c.is_visible()), "none");
	}

	#[test]
	fn show_and_hide_toggle_display_and_simulation() {
		let c = controller();
		c.show();
		assert!(c.is_visible());
		assert_eq!(display_value(c.is_visible()), "inline");
		assert!(c.state().borrow_mut().step(0.016));

		c.hide();
		c.hide();
		assert!(!c.is_visible());
		assert!(!c.state().borrow_mut().step(0.016));

		c.show();
		assert!(c.state().borrow_mut().step(0.016));
		assert_eq!(c.state().borrow().menu.nodes.len(), 3);
	}
}
