//! Force-directed site navigation menu.
//!
//! Renders a page's navigation as a star graph on an HTML canvas:
//! - A pinned root node for the current page, linked to every target
//! - Charge repulsion via `force_graph`, plus gravity, link-length and
//!   collision passes
//! - Draggable nodes, and clicks that navigate
//! - Show/hide toggling that also starts and stops the simulation
//!
//! # Example
//!
//! ```ignore
//! use force_menu::{ForceMenu, ForceMenuOptions, NavigationInput};
//!
//! let menu = ForceMenu::new(
//!     NavigationInput::Selector("nav.site-nav".into()),
//!     ForceMenuOptions::default(),
//! )?;
//! menu.show();
//! ```

/// `log!` under the `force_menu` target, dropped unless `$verbosity` (the
/// menu's own [`LevelFilter`](log::LevelFilter)) admits `$level`. The global
/// `log` filter still applies on top.
macro_rules! menu_log {
	($verbosity:expr, $level:expr, $($arg:tt)+) => {
		if $crate::components::force_menu::options::admits($verbosity, $level) {
			log::log!(target: "force_menu", $level, $($arg)+);
		}
	};
}

mod component;
mod controller;
mod error;
pub mod graph;
mod menu;
mod normalize;
pub mod options;
mod physics;
mod quadtree;
mod render;
mod state;
mod types;

pub use component::ForceMenuCanvas;
pub use controller::MenuController;
pub use error::MenuError;
pub use graph::{MenuGraph, MenuLink, MenuNode, NodeKind};
pub use menu::ForceMenu;
pub use normalize::{entries_from_anchors, normalize};
pub use options::{ForceMenuOptions, Viewport};
pub use state::{Activation, ForceMenuState};
pub use types::{NavigationData, NavigationEntry, NavigationInput};
