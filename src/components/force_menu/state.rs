//! Menu simulation state and pointer interaction tracking.
//!
//! Wraps the `force_graph` engine, which handles charge repulsion and
//! velocity. The [`MenuGraph`] is the source of truth for positions. Each
//! step it reads the engine's output, runs the positional passes from
//! [`physics`](super::physics), then writes the result back.

use force_graph::{DefaultNodeIdx, ForceGraph, NodeData, SimulationParameters};

use super::graph::{MenuGraph, MenuNode, NodeKind};
use super::options::{NodeStyle, ResolvedOptions, Viewport};
use super::physics::{self, ALPHA_START, Cooling};
use super::types::ROOT_URL;

/// Engine charge per unit of (negative) menu charge.
const CHARGE_SCALE: f32 = 5.0;

/// Pointer travel, in pixels, after which a press counts as a drag and no
/// longer as a click.
const CLICK_SLOP: f64 = 3.0;

/// `MouseEvent.button` of the primary (usually left) button. Only it grabs,
/// drags and activates nodes.
pub const PRIMARY_BUTTON: i16 = 0;

/// Per-node payload stored in the engine: the node's index in the menu.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeInfo {
	/// Index into [`MenuGraph::nodes`].
	pub index: usize,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A press is held.
	pub active: bool,
	/// The grabbed node.
	pub node: Option<usize>,
	/// Pointer position at the press.
	pub start_x: f64,
	/// Pointer position at the press.
	pub start_y: f64,
	/// Node position at the press.
	pub node_start_x: f64,
	/// Node position at the press.
	pub node_start_y: f64,
	/// Set once the pointer leaves the click slop.
	pub moved: bool,
	/// Whether the node was pinned before the drag began.
	was_fixed: bool,
}

/// What a click on a node asks the host to do.
#[derive(Clone, Debug, PartialEq)]
pub struct Activation {
	/// Where to navigate.
	pub url: String,
	/// Hide the menu before navigating.
	pub hide_first: bool,
}

impl Activation {
	/// What clicking `node` does.
	pub fn for_node(node: &MenuNode) -> Self {
		Self {
			url: node.url.clone(),
			hide_first: node.url == ROOT_URL,
		}
	}
}

/// The style that applies to a node of this kind.
pub fn style_for(kind: NodeKind, options: &ResolvedOptions) -> &NodeStyle {
	match kind {
		NodeKind::Root => &options.root,
		NodeKind::Navigation => &options.navigation,
	}
}

/// Simulation, layout, and drag state for one menu instance.
pub struct ForceMenuState {
	/// Engine providing charge repulsion.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Positions and styling data, read by the renderer.
	pub menu: MenuGraph,
	/// Options resolved for [`Self::viewport`].
	pub options: ResolvedOptions,
	/// The press in progress, if any.
	pub drag: DragState,
	/// Simulation temperature.
	pub cooling: Cooling,
	/// Canvas size.
	pub viewport: Viewport,
	handles: Vec<DefaultNodeIdx>,
}

impl ForceMenuState {
	/// Load `menu` into the engine. The simulation starts stopped.
	pub fn new(menu: MenuGraph, options: ResolvedOptions, viewport: Viewport) -> Self {
		// The engine only contributes charge repulsion. Link length is handled
		// by the distance pass, so the engine's springs are turned off.
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: (-options.charge).max(0.0) as f32 * CHARGE_SCALE,
			force_spring: 0.0,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let handles = menu
			.nodes
			.iter()
			.enumerate()
			.map(|(index, node)| {
				graph.add_node(NodeData {
					x: node.x as f32,
					y: node.y as f32,
					mass: 10.0,
					is_anchor: node.fixed,
					user_data: NodeInfo { index },
				})
			})
			.collect();

		Self {
			graph,
			menu,
			options,
			drag: DragState::default(),
			cooling: Cooling::default(),
			viewport,
			handles,
		}
	}

	/// Whether steps still move anything.
	pub fn is_running(&self) -> bool {
		self.cooling.is_running()
	}

	/// Reheat the simulation to its starting alpha.
	pub fn start(&mut self) {
		self.cooling.start();
	}

	/// Halt the simulation. Positions stay where they are.
	pub fn stop(&mut self) {
		self.cooling.stop();
	}

	/// Advance one frame. Returns `false` without touching anything once the
	/// simulation is stopped or has cooled down.
	pub fn step(&mut self, dt: f32) -> bool {
		let Some(alpha) = self.cooling.cool() else {
			return false;
		};

		let pins: Vec<(usize, f64, f64)> = self
			.menu
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, n)| n.fixed)
			.map(|(i, n)| (i, n.x, n.y))
			.collect();

		self.graph.update(dt * (alpha / ALPHA_START) as f32);
		self.pull_positions();

		let nodes = &mut self.menu.nodes;
		physics::apply_gravity(nodes, self.viewport.center(), alpha * self.options.gravity);
		physics::apply_link_distance(nodes, &self.menu.links, self.options.line_distance, alpha);
		physics::resolve_collisions(nodes, self.options.collision_margin);

		for (i, x, y) in pins {
			nodes[i].x = x;
			nodes[i].y = y;
		}
		self.push_positions();
		true
	}

	fn pull_positions(&mut self) {
		let nodes = &mut self.menu.nodes;
		self.graph.visit_nodes(|node| {
			if let Some(n) = nodes.get_mut(node.data.user_data.index) {
				n.x = node.x() as f64;
				n.y = node.y() as f64;
			}
		});
	}

	fn push_positions(&mut self) {
		let nodes = &self.menu.nodes;
		self.graph.visit_nodes_mut(|node| {
			if let Some(n) = nodes.get(node.data.user_data.index) {
				node.data.x = n.x as f32;
				node.data.y = n.y as f32;
				node.data.is_anchor = n.fixed;
			}
		});
	}

	/// Move one node and mirror the change into the engine.
	pub fn place_node(&mut self, index: usize, x: f64, y: f64) {
		let Some(node) = self.menu.nodes.get_mut(index) else {
			return;
		};
		node.x = x;
		node.y = y;
		let (fixed, handle) = (node.fixed, self.handles[index]);
		self.graph.visit_nodes_mut(|n| {
			if n.index() == handle {
				n.data.x = x as f32;
				n.data.y = y as f32;
				n.data.is_anchor = fixed;
			}
		});
	}

	/// Topmost node whose circle contains the point.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		self.menu.nodes.iter().enumerate().rev().find_map(|(i, n)| {
			let (dx, dy) = (n.x - x, n.y - y);
			((dx * dx + dy * dy).sqrt() < n.radius).then_some(i)
		})
	}

	/// Pointer press with `button`. Anything but the primary button is
	/// ignored.
	pub fn press(&mut self, x: f64, y: f64, button: i16) -> bool {
		button == PRIMARY_BUTTON && self.begin_drag(x, y)
	}

	/// Pointer release with `button`. Releasing any other button leaves a
	/// primary press held.
	pub fn release(&mut self, button: i16) -> Option<Activation> {
		if button != PRIMARY_BUTTON {
			return None;
		}
		self.end_drag()
	}

	/// Press at a point. Grabs the node under it, if any, and reheats the
	/// simulation. A press while another is held grabs nothing.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		if self.drag.active {
			return false;
		}
		let Some(index) = self.node_at_position(x, y) else {
			return false;
		};
		let node = &mut self.menu.nodes[index];
		self.drag = DragState {
			active: true,
			node: Some(index),
			start_x: x,
			start_y: y,
			node_start_x: node.x,
			node_start_y: node.y,
			moved: false,
			was_fixed: node.fixed,
		};
		node.fixed = true;
		self.cooling.resume();
		true
	}

	/// Pointer moved. Moves the grabbed node once past the click slop.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		let (true, Some(index)) = (self.drag.active, self.drag.node) else {
			return;
		};
		let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
		if !self.drag.moved && (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
			self.drag.moved = true;
		}
		if self.drag.moved {
			self.place_node(index, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
			self.cooling.resume();
		}
	}

	/// Release the pointer. A press that never left the click slop activates
	/// the node it grabbed.
	pub fn end_drag(&mut self) -> Option<Activation> {
		let drag = std::mem::take(&mut self.drag);
		let index = drag.node.filter(|_| drag.active)?;
		let node = self.menu.nodes.get_mut(index)?;
		// A dragged navigation node goes back to the simulation. The root stays
		// wherever it was dropped.
		node.fixed = drag.was_fixed;
		let activation = (!drag.moved).then(|| Activation::for_node(node));
		let (x, y) = (node.x, node.y);
		self.place_node(index, x, y);
		activation
	}

	/// Abandon a drag without activating anything.
	pub fn cancel_drag(&mut self) {
		if self.drag.active {
			self.drag.moved = true;
			self.end_drag();
		}
	}
}
