//! Positional passes run after each engine update: centre gravity, link
//! length, and circle collision.
//!
//! These mutate [`MenuNode`] positions in place. Gravity and link passes leave
//! fixed nodes alone. The collision pass moves both members of a pair, fixed or
//! not; callers re-pin afterwards.

use super::graph::{MenuLink, MenuNode, ROOT_INDEX};
use super::quadtree::{QuadBounds, QuadTree};

/// Alpha set by `start` and `resume`.
pub const ALPHA_START: f64 = 0.1;
/// Multiplier applied to alpha each step.
pub const ALPHA_DECAY: f64 = 0.99;
/// Below this alpha the simulation halts on its own.
pub const ALPHA_MIN: f64 = 0.005;

const EPSILON: f64 = 1e-9;

/// Simulation temperature. Every step cools it, and motion stops once it is
/// cold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cooling {
	alpha: f64,
}

impl Cooling {
	/// Whether alpha is still above zero.
	pub fn is_running(&self) -> bool {
		self.alpha > 0.0
	}

	/// Reset alpha to [`ALPHA_START`].
	pub fn start(&mut self) {
		self.alpha = ALPHA_START;
	}

	/// Reheat without cooling an already hotter simulation.
	pub fn resume(&mut self) {
		self.alpha = self.alpha.max(ALPHA_START);
	}

	/// Cool instantly.
	pub fn stop(&mut self) {
		self.alpha = 0.0;
	}

	/// Cool by one step. Returns the alpha for this step, or `None` once the
	/// simulation is stopped.
	pub fn cool(&mut self) -> Option<f64> {
		if !self.is_running() {
			return None;
		}
		self.alpha *= ALPHA_DECAY;
		if self.alpha < ALPHA_MIN {
			self.alpha = 0.0;
			return None;
		}
		Some(self.alpha)
	}
}

/// Pull every free node towards `center` by `strength` of the remaining gap.
pub fn apply_gravity(nodes: &mut [MenuNode], center: (f64, f64), strength: f64) {
	for node in nodes.iter_mut().filter(|n| !n.fixed) {
		node.x += (center.0 - node.x) * strength;
		node.y += (center.1 - node.y) * strength;
	}
}

/// Nudge each link towards `distance`. A free endpoint tied to a fixed one
/// takes the whole correction; two free endpoints split it.
pub fn apply_link_distance(nodes: &mut [MenuNode], links: &[MenuLink], distance: f64, alpha: f64) {
	for link in links {
		let (s, t) = (link.source, link.target);
		if s == t || s >= nodes.len() || t >= nodes.len() {
			continue;
		}
		let (dx, dy) = (nodes[t].x - nodes[s].x, nodes[t].y - nodes[s].y);
		let l = (dx * dx + dy * dy).sqrt();
		if l < EPSILON {
			continue;
		}
		let k = alpha * (l - distance) / l;
		let (mx, my) = (dx * k, dy * k);

		let share = match (nodes[s].fixed, nodes[t].fixed) {
			(true, true) => continue,
			(false, true) => 1.0,
			(true, false) => 0.0,
			(false, false) => 0.5,
		};
		if !nodes[s].fixed {
			nodes[s].x += mx * share;
			nodes[s].y += my * share;
		}
		if !nodes[t].fixed {
			nodes[t].x -= mx * (1.0 - share);
			nodes[t].y -= my * (1.0 - share);
		}
	}
}

/// Push nodes `i` and `j` apart if their circles, grown by `margin`, overlap.
/// Each moves half the overlap along the line between the centres. Returns
/// whether anything moved.
pub fn collide_pair(nodes: &mut [MenuNode], i: usize, j: usize, margin: f64) -> bool {
	if i == j {
		return false;
	}
	let (dx, dy) = (nodes[i].x - nodes[j].x, nodes[i].y - nodes[j].y);
	let min_distance = nodes[i].radius + nodes[j].radius + margin;
	let l = (dx * dx + dy * dy).sqrt();
	if l.is_nan() || l >= min_distance {
		return false;
	}

	// Coincident centres have no direction of their own.
	let (ux, uy) = if l > EPSILON { (dx / l, dy / l) } else { (1.0, 0.0) };
	let push = (min_distance - l) * 0.5;
	nodes[i].x += ux * push;
	nodes[i].y += uy * push;
	nodes[j].x -= ux * push;
	nodes[j].y -= uy * push;
	true
}

/// Resolve overlaps across the whole graph.
///
/// Candidates come from a quadtree built over the positions at entry. Every
/// node except the root acts as the mover in turn. The root is still pushed
/// when a mover hits it.
pub fn resolve_collisions(nodes: &mut [MenuNode], margin: f64) {
	if nodes.len() < 2 {
		return;
	}
	let points: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x, n.y)).collect();
	let tree = QuadTree::build(&points);
	let max_radius = nodes.iter().map(|n| n.radius).fold(0.0, f64::max);

	for i in (ROOT_INDEX + 1)..nodes.len() {
		let reach = nodes[i].radius + max_radius + margin;
		let region = QuadBounds::around(nodes[i].x, nodes[i].y, reach);
		for j in tree.candidates(region) {
			collide_pair(nodes, i, j, margin);
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::force_menu::graph::NodeKind;

	pub(crate) fn body(x: f64, y: f64, radius: f64) -> MenuNode {
		MenuNode {
			name: String::new(),
			group: 1,
			url: "/".into(),
			radius,
			x,
			y,
			fixed: false,
			kind: NodeKind::Navigation,
		}
	}

	fn distance(a: &MenuNode, b: &MenuNode) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn overlapping_pair_splits_displacement_evenly() {
		let mut nodes = vec![body(0.0, 0.0, 10.0), body(12.0, 0.0, 10.0)];
		assert!(collide_pair(&mut nodes, 1, 0, 0.0));
		assert!((nodes[0].x + 4.0).abs() < 1e-9);
		assert!((nodes[1].x - 16.0).abs() < 1e-9);
		assert!((distance(&nodes[0], &nodes[1]) - 20.0).abs() < 1e-9);
	}

	#[test]
	fn margin_widens_the_gap() {
		let mut nodes = vec![body(0.0, 0.0, 5.0), body(0.0, 12.0, 5.0)];
		assert!(collide_pair(&mut nodes, 0, 1, 4.0));
		assert!((distance(&nodes[0], &nodes[1]) - 14.0).abs() < 1e-9);
		assert_eq!(nodes[0].x, 0.0);
	}

	#[test]
	fn separated_pair_is_left_alone() {
		let mut nodes = vec![body(0.0, 0.0, 5.0), body(30.0, 0.0, 5.0)];
		let before = nodes.clone();
		assert!(!collide_pair(&mut nodes, 0, 1, 16.0));
		assert_eq!(nodes, before);
	}

	#[test]
	fn coincident_centres_separate_along_x() {
		let mut nodes = vec![body(3.0, 3.0, 5.0), body(3.0, 3.0, 5.0)];
		assert!(collide_pair(&mut nodes, 1, 0, 0.0));
		assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
		assert!((distance(&nodes[0], &nodes[1]) - 10.0).abs() < 1e-9);
		assert_eq!(nodes[0].y, 3.0);
	}

	#[test]
	fn crowd_relaxes_to_no_overlap() {
		let mut nodes: Vec<_> = (0..12)
			.map(|i| body(100.0 + (i % 4) as f64 * 3.0, 100.0 + (i / 4) as f64 * 3.0, 8.0))
			.collect();
		for _ in 0..200 {
			resolve_collisions(&mut nodes, 0.0);
		}
		for a in 0..nodes.len() {
			for b in (a + 1)..nodes.len() {
				assert!(
					distance(&nodes[a], &nodes[b]) >= 16.0 - 1e-3,
					"nodes {a} and {b} still overlap"
				);
			}
		}
	}

	#[test]
	fn root_is_hit_but_never_the_mover() {
		// Only the root overlaps anything, and only with node 1.
		let mut nodes = vec![body(0.0, 0.0, 10.0), body(15.0, 0.0, 10.0), body(500.0, 0.0, 10.0)];
		resolve_collisions(&mut nodes, 0.0);
		assert!((nodes[0].x + 2.5).abs() < 1e-9);
		assert!((nodes[1].x - 17.5).abs() < 1e-9);
		assert_eq!(nodes[2].x, 500.0);
	}

	#[test]
	fn gravity_skips_fixed_nodes() {
		let mut nodes = vec![body(0.0, 0.0, 1.0), body(100.0, 0.0, 1.0)];
		nodes[0].fixed = true;
		apply_gravity(&mut nodes, (50.0, 0.0), 0.1);
		assert_eq!(nodes[0].x, 0.0);
		assert!((nodes[1].x - 95.0).abs() < 1e-9);
	}

	#[test]
	fn link_to_fixed_target_moves_source_only() {
		let mut nodes = vec![body(0.0, 0.0, 1.0), body(200.0, 0.0, 1.0)];
		nodes[0].fixed = true;
		let links = [MenuLink { source: 1, target: 0, value: 10.0 }];
		apply_link_distance(&mut nodes, &links, 100.0, 0.5);
		assert_eq!(nodes[0].x, 0.0);
		assert!((nodes[1].x - 150.0).abs() < 1e-9);

		// Too short pushes outwards.
		nodes[1].x = 50.0;
		apply_link_distance(&mut nodes, &links, 100.0, 0.5);
		assert!((nodes[1].x - 75.0).abs() < 1e-9);
	}

	#[test]
	fn cooling_halts_and_restarts() {
		let mut cooling = Cooling::default();
		assert_eq!(cooling.cool(), None);

		cooling.start();
		let first = cooling.cool().unwrap();
		assert!((first - ALPHA_START * ALPHA_DECAY).abs() < 1e-12);

		let mut steps = 1;
		while cooling.cool().is_some() {
			steps += 1;
			assert!(steps < 1000);
		}
		assert!(!cooling.is_running());
		assert!(steps > 200);

		cooling.resume();
		assert!(cooling.cool().is_some());
		cooling.stop();
		assert_eq!(cooling.cool(), None);
	}
}
