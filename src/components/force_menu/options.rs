//! Menu configuration.
//!
//! [`ForceMenuOptions`] is what callers write (or embed as JSON with the same
//! camelCase keys). Sizes left unset scale with the viewport diagonal and are
//! filled in by [`ForceMenuOptions::resolve`], which produces the
//! [`ResolvedOptions`] the simulation and renderer read.

use log::{Level, LevelFilter};
use serde::de::{self, Deserializer};
use serde::Deserialize;

use super::error::MenuError;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	/// A viewport of the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Length of the diagonal. Default sizes scale with it.
	pub fn diagonal(&self) -> f64 {
		(self.width * self.width + self.height * self.height).sqrt()
	}

	/// Centre point, where the root sits.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// Whether a message at `level` passes a menu's own `verbosity`.
pub fn admits(verbosity: LevelFilter, level: Level) -> bool {
	level <= verbosity
}

/// A JSON number, or a string holding one (`"0.05"`, `"1px"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
	Number(f64),
	Text(String),
}

impl NumberOrText {
	fn into_number(self) -> Result<f64, String> {
		let text = match self {
			Self::Number(n) => return Ok(n),
			Self::Text(text) => text,
		};
		let trimmed = text.trim();
		let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
		digits
			.parse::<f64>()
			.ok()
			.filter(|n| n.is_finite())
			.ok_or_else(|| format!("expected a number, got {text:?}"))
	}
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	NumberOrText::deserialize(deserializer)?
		.into_number()
		.map_err(de::Error::custom)
}

fn lenient_optional_number<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<Option<f64>, D::Error> {
	Option::<NumberOrText>::deserialize(deserializer)?
		.map(NumberOrText::into_number)
		.transpose()
		.map_err(de::Error::custom)
}

/// User-facing configuration. Every key is optional in JSON.
///
/// Numeric keys take either JSON numbers or strings such as `"0.05"` and
/// `"1px"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceMenuOptions {
	/// Pull of every node towards the viewport centre.
	#[serde(deserialize_with = "lenient_number")]
	pub gravity: f64,
	/// Node charge. Negative values repel.
	#[serde(deserialize_with = "lenient_number")]
	pub charge: f64,
	/// Navigation node fill.
	pub navigation_fill_color: String,
	/// Navigation node outline.
	pub navigation_stroke_color: String,
	/// Navigation node radius. Defaults to a twentieth of the diagonal.
	#[serde(deserialize_with = "lenient_optional_number")]
	pub navigation_radius: Option<f64>,
	/// Root node fill.
	pub root_fill_color: String,
	/// Root node outline.
	pub root_stroke_color: String,
	/// Root node radius. Defaults to a twentieth of the diagonal.
	#[serde(deserialize_with = "lenient_optional_number")]
	pub root_radius: Option<f64>,
	/// Link colour.
	pub line_stroke_color: String,
	/// Link width in pixels.
	#[serde(deserialize_with = "lenient_number")]
	pub line_stroke_width: f64,
	/// Target link length. Defaults to a sixth of the diagonal.
	#[serde(deserialize_with = "lenient_optional_number")]
	pub line_distance: Option<f64>,
	/// Label outline colour.
	pub text_stroke_color: String,
	/// Accepted for compatibility. Label size is always derived from the
	/// longest navigation name.
	#[serde(deserialize_with = "lenient_optional_number")]
	pub text_size: Option<f64>,
	/// CSS selector of the element the menu mounts into.
	pub container: String,
	/// Extra clearance kept between colliding circles.
	#[serde(deserialize_with = "lenient_number")]
	pub collision_margin: f64,
	/// Verbosity of this menu's console output, under the `force_menu` log
	/// target. The host's global `log` level is left alone.
	pub log_level: LevelFilter,
}

impl Default for ForceMenuOptions {
	fn default() -> Self {
		Self {
			gravity: 0.05,
			charge: -30.0,
			navigation_fill_color: "#AABED8".into(),
			navigation_stroke_color: "#999999".into(),
			navigation_radius: None,
			root_fill_color: "rgb(31, 119, 180)".into(),
			root_stroke_color: "#999999".into(),
			root_radius: None,
			line_stroke_color: "#666666".into(),
			line_stroke_width: 1.0,
			line_distance: None,
			text_stroke_color: "#000000".into(),
			text_size: None,
			container: "body".into(),
			collision_margin: 16.0,
			log_level: LevelFilter::Debug,
		}
	}
}

/// Fill, stroke and radius for one kind of node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	/// Circle fill.
	pub fill: String,
	/// Circle outline.
	pub stroke: String,
	/// Circle radius in pixels.
	pub radius: f64,
}

/// Fully resolved configuration for one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
	/// Centre pull, scaled by alpha each step.
	pub gravity: f64,
	/// Node charge as configured.
	pub charge: f64,
	/// Style of navigation nodes.
	pub navigation: NodeStyle,
	/// Style of the root node.
	pub root: NodeStyle,
	/// Link colour.
	pub line_stroke_color: String,
	/// Link width in pixels.
	pub line_stroke_width: f64,
	/// Target link length in pixels.
	pub line_distance: f64,
	/// Label outline colour.
	pub text_stroke_color: String,
	/// Clearance between colliding circles, never negative.
	pub collision_margin: f64,
	/// This menu's own log verbosity.
	pub log_level: LevelFilter,
}

impl ForceMenuOptions {
	/// Parse options from a JSON object.
	pub fn from_json(json: &str) -> Result<Self, MenuError> {
		serde_json::from_str(json).map_err(MenuError::InvalidOptions)
	}

	/// Fill in viewport-relative defaults.
	pub fn resolve(&self, viewport: Viewport) -> ResolvedOptions {
		let diagonal = viewport.diagonal();
		if self.text_size.is_some() {
			menu_log!(
				self.log_level,
				Level::Debug,
				"force-menu: textSize is derived from node names, ignoring configured value"
			);
		}

		ResolvedOptions {
			gravity: self.gravity,
			charge: self.charge,
			navigation: NodeStyle {
				fill: self.navigation_fill_color.clone(),
				stroke: self.navigation_stroke_color.clone(),
				radius: self.navigation_radius.unwrap_or(diagonal / 20.0),
			},
			root: NodeStyle {
				fill: self.root_fill_color.clone(),
				stroke: self.root_stroke_color.clone(),
				radius: self.root_radius.unwrap_or(diagonal / 20.0),
			},
			line_stroke_color: self.line_stroke_color.clone(),
			line_stroke_width: self.line_stroke_width,
			line_distance: self.line_distance.unwrap_or(diagonal / 6.0),
			text_stroke_color: self.text_stroke_color.clone(),
			collision_margin: self.collision_margin.max(0.0),
			log_level: self.log_level,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn diagonal_defaults_scale_with_viewport() {
		let resolved = ForceMenuOptions::default().resolve(Viewport::new(300.0, 400.0));
		assert_eq!(resolved.navigation.radius, 25.0);
		assert_eq!(resolved.root.radius, 25.0);
		assert!((resolved.line_distance - 500.0 / 6.0).abs() < 1e-9);
		assert_eq!(resolved.gravity, 0.05);
		assert_eq!(resolved.charge, -30.0);
		assert_eq!(resolved.root.fill, "rgb(31, 119, 180)");
	}

	#[test]
	fn json_uses_camel_case_keys_and_keeps_defaults() {
		let options = ForceMenuOptions::from_json(
			r##"{"rootRadius": 12, "lineStrokeColor": "#123456", "container": "#menu", "logLevel": "warn"}"##,
		)
		.unwrap();
		assert_eq!(options.root_radius, Some(12.0));
		assert_eq!(options.line_stroke_color, "#123456");
		assert_eq!(options.container, "#menu");
		assert_eq!(options.log_level, LevelFilter::Warn);
		assert_eq!(options.navigation_fill_color, "#AABED8");
		assert_eq!(options.collision_margin, 16.0);

		let resolved = options.resolve(Viewport::new(300.0, 400.0));
		assert_eq!(resolved.root.radius, 12.0);
		assert_eq!(resolved.navigation.radius, 25.0);
	}

	#[test]
	fn numeric_strings_and_pixel_suffixes_are_accepted() {
		let options = ForceMenuOptions::from_json(
			r#"{"gravity": "0.05", "charge": "-30", "lineStrokeWidth": "1px", "lineDistance": " 120 px ", "textSize": "12px"}"#,
		)
		.unwrap();
		assert_eq!(options.gravity, 0.05);
		assert_eq!(options.charge, -30.0);
		assert_eq!(options.line_stroke_width, 1.0);
		assert_eq!(options.line_distance, Some(120.0));
		assert_eq!(options.text_size, Some(12.0));
		assert_eq!(options.root_radius, None);
	}

	#[test]
	fn malformed_json_is_an_options_error() {
		let err = ForceMenuOptions::from_json(r#"{"gravity": "strong"}"#).unwrap_err();
		assert!(matches!(err, MenuError::InvalidOptions(_)));
		let err = ForceMenuOptions::from_json(r#"{"rootRadius": "NaN"}"#).unwrap_err();
		assert!(matches!(err, MenuError::InvalidOptions(_)));
	}

	#[test]
	fn verbosity_stays_with_the_menu() {
		let global = log::max_level();
		let options = ForceMenuOptions::from_json(r#"{"logLevel": "error"}"#).unwrap();
		let resolved = options.resolve(Viewport::new(300.0, 400.0));
		assert_eq!(resolved.log_level, LevelFilter::Error);
		assert_eq!(log::max_level(), global);

		assert!(admits(resolved.log_level, Level::Error));
		assert!(!admits(resolved.log_level, Level::Warn));
		assert!(!admits(LevelFilter::Off, Level::Error));
		assert!(admits(LevelFilter::Debug, Level::Info));
	}
}
