//! Navigation input records and the constructor's input variants.

use serde::Deserialize;
use web_sys::Element;

/// Group assigned to navigation targets when the input does not name one.
pub const NAVIGATION_GROUP: u32 = 1;

/// Group of the synthetic root node.
pub const ROOT_GROUP: u32 = 2;

/// Placeholder URL carried by the root node. Clicking a node with this URL
/// hides the menu instead of leaving the page.
pub const ROOT_URL: &str = "#";

fn default_group() -> u32 {
	NAVIGATION_GROUP
}

fn default_url() -> String {
	ROOT_URL.to_string()
}

/// One navigation target as supplied by the page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavigationEntry {
	/// Visible link text, drawn as the node label.
	pub name: String,
	/// Cluster group. Defaults to [`NAVIGATION_GROUP`].
	#[serde(default = "default_group")]
	pub group: u32,
	/// Navigation target. Missing URLs fall back to [`ROOT_URL`].
	#[serde(default = "default_url")]
	pub url: String,
}

impl NavigationEntry {
	/// An entry in [`NAVIGATION_GROUP`].
	pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			group: NAVIGATION_GROUP,
			url: url.into(),
		}
	}
}

/// A pre-built dataset: `{ "nodes": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NavigationData {
	/// Entries in display order.
	#[serde(default)]
	pub nodes: Vec<NavigationEntry>,
}

/// What the menu is built from. The caller states which kind of input it is.
#[derive(Clone, Debug)]
pub enum NavigationInput {
	/// Records used as-is.
	Dataset(NavigationData),
	/// Raw elements whose `a` descendants become navigation entries.
	Elements(Vec<Element>),
	/// CSS selector resolved against the document, then treated as `Elements`.
	Selector(String),
}

impl From<NavigationData> for NavigationInput {
	fn from(data: NavigationData) -> Self {
		Self::Dataset(data)
	}
}

impl From<Vec<NavigationEntry>> for NavigationInput {
	fn from(nodes: Vec<NavigationEntry>) -> Self {
		Self::Dataset(NavigationData { nodes })
	}
}
