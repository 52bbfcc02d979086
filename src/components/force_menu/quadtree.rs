//! Point quadtree over node centres, used to find collision candidates.

const LEAF_CAPACITY: usize = 4;
const MAX_DEPTH: usize = 10;

/// Axis-aligned box, `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBounds {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

impl QuadBounds {
	/// Square box centred on `(x, y)` reaching `reach` in every direction.
	pub fn around(x: f64, y: f64, reach: f64) -> Self {
		Self {
			x1: x - reach,
			y1: y - reach,
			x2: x + reach,
			y2: y + reach,
		}
	}

	/// Smallest square enclosing every finite point, padded by one unit.
	fn from_points(points: &[(f64, f64)]) -> Option<Self> {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for &(x, y) in points {
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		}
		if !min_x.is_finite() || !min_y.is_finite() || !max_x.is_finite() || !max_y.is_finite() {
			return None;
		}

		let half = (max_x - min_x).max(max_y - min_y).max(1.0) * 0.5 + 1.0;
		let (cx, cy) = ((min_x + max_x) * 0.5, (min_y + max_y) * 0.5);
		Some(Self::around(cx, cy, half))
	}

	fn center(self) -> (f64, f64) {
		((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
	}

	fn child(self, quadrant: usize) -> Self {
		let (cx, cy) = self.center();
		match quadrant {
			0 => Self { x2: cx, y2: cy, ..self },
			1 => Self { x1: cx, y2: cy, ..self },
			2 => Self { x2: cx, y1: cy, ..self },
			_ => Self { x1: cx, y1: cy, ..self },
		}
	}

	fn quadrant_for(self, (x, y): (f64, f64)) -> usize {
		let (cx, cy) = self.center();
		match (x >= cx, y >= cy) {
			(false, false) => 0,
			(true, false) => 1,
			(false, true) => 2,
			(true, true) => 3,
		}
	}

	pub fn intersects(self, other: Self) -> bool {
		!(self.x1 > other.x2 || self.x2 < other.x1 || self.y1 > other.y2 || self.y2 < other.y1)
	}
}

struct QuadNode {
	bounds: QuadBounds,
	/// Point indices. Only leaves hold any.
	indices: Vec<usize>,
	children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
	fn build(bounds: QuadBounds, indices: Vec<usize>, points: &[(f64, f64)], depth: usize) -> Self {
		let mut node = Self {
			bounds,
			indices,
			children: std::array::from_fn(|_| None),
		};
		if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
			return node;
		}

		let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
		for &index in &node.indices {
			buckets[bounds.quadrant_for(points[index])].push(index);
		}
		if buckets.iter().filter(|b| !b.is_empty()).count() <= 1 {
			return node;
		}

		for (quadrant, bucket) in buckets.into_iter().enumerate() {
			if bucket.is_empty() {
				continue;
			}
			node.children[quadrant] = Some(Box::new(Self::build(
				bounds.child(quadrant),
				bucket,
				points,
				depth + 1,
			)));
		}
		node.indices.clear();
		node
	}

	fn visit<F>(&self, visitor: &mut F)
	where
		F: FnMut(&[usize], QuadBounds) -> bool,
	{
		if visitor(&self.indices, self.bounds) {
			return;
		}
		for child in self.children.iter().flatten() {
			child.visit(visitor);
		}
	}
}

/// Spatial index over a snapshot of points. Indices refer to the slice the
/// tree was built from.
pub struct QuadTree {
	root: Option<QuadNode>,
}

impl QuadTree {
	pub fn build(points: &[(f64, f64)]) -> Self {
		let root = QuadBounds::from_points(points)
			.map(|bounds| QuadNode::build(bounds, (0..points.len()).collect(), points, 0));
		Self { root }
	}

	/// Pre-order walk. The visitor receives each cell's points and bounds and
	/// returns `true` to skip that cell's children.
	pub fn visit<F>(&self, mut visitor: F)
	where
		F: FnMut(&[usize], QuadBounds) -> bool,
	{
		if let Some(root) = &self.root {
			root.visit(&mut visitor);
		}
	}

	/// Indices of every point stored in a cell overlapping `region`.
	pub fn candidates(&self, region: QuadBounds) -> Vec<usize> {
		let mut found = Vec::new();
		self.visit(|indices, bounds| {
			if !bounds.intersects(region) {
				return true;
			}
			found.extend_from_slice(indices);
			false
		});
		found
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn grid(n: usize, spacing: f64) -> Vec<(f64, f64)> {
		(0..n * n)
			.map(|i| ((i % n) as f64 * spacing, (i / n) as f64 * spacing))
			.collect()
	}

	#[test]
	fn every_point_is_visited_once() {
		let points = grid(8, 10.0);
		let tree = QuadTree::build(&points);
		let mut seen = Vec::new();
		tree.visit(|indices, _| {
			seen.extend_from_slice(indices);
			false
		});
		seen.sort_unstable();
		assert_eq!(seen, (0..points.len()).collect::<Vec<_>>());
	}

	#[test]
	fn candidates_cover_points_inside_region() {
		let points = grid(10, 10.0);
		let tree = QuadTree::build(&points);
		let region = QuadBounds::around(45.0, 45.0, 6.0);
		let found = tree.candidates(region);
		for (i, &(x, y)) in points.iter().enumerate() {
			if x >= region.x1 && x <= region.x2 && y >= region.y1 && y <= region.y2 {
				assert!(found.contains(&i), "point {i} at ({x}, {y}) missing");
			}
		}
		assert!(found.len() < points.len());
	}

	#[test]
	fn coincident_points_stay_in_one_leaf() {
		let points = vec![(5.0, 5.0); 20];
		let tree = QuadTree::build(&points);
		assert_eq!(tree.candidates(QuadBounds::around(5.0, 5.0, 1.0)).len(), 20);
	}

	#[test]
	fn empty_and_non_finite_inputs_build_empty_trees() {
		assert!(QuadTree::build(&[]).candidates(QuadBounds::around(0.0, 0.0, 1e9)).is_empty());
		let tree = QuadTree::build(&[(f64::NAN, f64::NAN)]);
		assert!(tree.candidates(QuadBounds::around(0.0, 0.0, 1e9)).is_empty());
	}
}
