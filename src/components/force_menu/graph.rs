//! Star-shaped menu graph: one root for the current page, linked to every
//! navigation target.

use super::options::{ResolvedOptions, Viewport};
use super::types::{NavigationEntry, ROOT_GROUP, ROOT_URL};

/// Weight carried by every link.
pub const LINK_VALUE: f64 = 10.0;

/// Index of the root node in [`MenuGraph::nodes`].
pub const ROOT_INDEX: usize = 0;

/// Which role a node plays. Decides styling and pinning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// The current page.
	Root,
	/// A navigation target.
	Navigation,
}

/// A node as laid out by the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuNode {
	/// Label.
	pub name: String,
	/// Cluster group from the input.
	pub group: u32,
	/// Click target.
	pub url: String,
	/// Circle radius in pixels.
	pub radius: f64,
	/// Position in canvas pixels.
	pub x: f64,
	/// Position in canvas pixels.
	pub y: f64,
	/// Pinned nodes are never moved by the simulation.
	pub fixed: bool,
	/// Root or navigation.
	pub kind: NodeKind,
}

impl MenuNode {
	/// Whether this is the page's root node.
	pub fn is_root(&self) -> bool {
		self.kind == NodeKind::Root
	}
}

/// A link from a navigation node to the root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuLink {
	/// Index of the navigation node.
	pub source: usize,
	/// Index of the root.
	pub target: usize,
	/// Always [`LINK_VALUE`].
	pub value: f64,
}

/// Nodes and links of one menu.
#[derive(Clone, Debug)]
pub struct MenuGraph {
	/// Root first, then one node per entry in input order.
	pub nodes: Vec<MenuNode>,
	/// One link per navigation node.
	pub links: Vec<MenuLink>,
	/// Longest navigation name, in characters. The root's title is not counted.
	pub max_name_length: usize,
	/// Label font size in pixels.
	pub text_size: f64,
}

impl MenuGraph {
	/// Build the complete graph in one pass.
	///
	/// The root takes index 0 and entry `i` lands at index `i + 1`, linked to
	/// the root. Navigation nodes start on a ring around the centre so the
	/// first frames do not begin from a single point.
	pub fn build(
		entries: Vec<NavigationEntry>,
		title: &str,
		viewport: Viewport,
		options: &ResolvedOptions,
	) -> Self {
		let max_name_length = entries
			.iter()
			.map(|e| e.name.chars().count())
			.max()
			.unwrap_or(0);
		let text_size = viewport.diagonal() / (10.0 * max_name_length.max(1) as f64);

		let (cx, cy) = viewport.center();
		let count = entries.len();
		let mut nodes = Vec::with_capacity(count + 1);
		nodes.push(MenuNode {
			name: title.to_string(),
			group: ROOT_GROUP,
			url: ROOT_URL.to_string(),
			radius: options.root.radius,
			x: cx,
			y: cy,
			fixed: true,
			kind: NodeKind::Root,
		});

		let mut links = Vec::with_capacity(count);
		for (i, entry) in entries.into_iter().enumerate() {
			let angle = (i as f64) * std::f64::consts::TAU / count as f64;
			nodes.push(MenuNode {
				name: entry.name,
				group: entry.group,
				url: entry.url,
				radius: options.navigation.radius,
				x: cx + options.line_distance * angle.cos(),
				y: cy + options.line_distance * angle.sin(),
				fixed: false,
				kind: NodeKind::Navigation,
			});
			links.push(MenuLink {
				source: i + 1,
				target: ROOT_INDEX,
				value: LINK_VALUE,
			});
		}

		Self {
			nodes,
			links,
			max_name_length,
			text_size,
		}
	}

	/// The root node.
	pub fn root(&self) -> &MenuNode {
		&self.nodes[ROOT_INDEX]
	}

	/// Number of navigation nodes.
	pub fn navigation_count(&self) -> usize {
		self.nodes.len() - 1
	}
}
