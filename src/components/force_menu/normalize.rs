//! Turns constructor input into navigation entries.

use log::{Level, LevelFilter};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use super::types::{NavigationEntry, NavigationInput, ROOT_URL};

/// Resolve any [`NavigationInput`] into a flat list of entries.
///
/// Element and selector inputs contribute one entry per anchor found; a
/// selector that fails to parse contributes none. Progress is logged at
/// `verbosity`.
pub fn normalize(
	input: NavigationInput,
	document: &Document,
	verbosity: LevelFilter,
) -> Vec<NavigationEntry> {
	match input {
		NavigationInput::Dataset(data) => {
			menu_log!(
				verbosity,
				Level::Debug,
				"force-menu: input is a data set of {} entries",
				data.nodes.len()
			);
			data.nodes
		}
		NavigationInput::Elements(elements) => {
			menu_log!(
				verbosity,
				Level::Debug,
				"force-menu: converting {} elements to a data set",
				elements.len()
			);
			entries_from_anchors(collect_anchors(&elements, verbosity))
		}
		NavigationInput::Selector(selector) => match document.query_selector_all(&selector) {
			Ok(list) => {
				let elements = node_list_elements(&list);
				menu_log!(
					verbosity,
					Level::Debug,
					"force-menu: selector {:?} matched {} elements",
					selector,
					elements.len()
				);
				entries_from_anchors(collect_anchors(&elements, verbosity))
			}
			Err(e) => {
				menu_log!(
					verbosity,
					Level::Warn,
					"force-menu: invalid selector {:?}: {:?}",
					selector,
					e
				);
				Vec::new()
			}
		},
	}
}

/// Build entries from `(text, href)` pairs, in order.
pub fn entries_from_anchors<I>(anchors: I) -> Vec<NavigationEntry>
where
	I: IntoIterator<Item = (String, Option<String>)>,
{
	anchors
		.into_iter()
		.map(|(text, href)| {
			NavigationEntry::new(
				text.trim(),
				href.filter(|h| !h.is_empty())
					.unwrap_or_else(|| ROOT_URL.to_string()),
			)
		})
		.collect()
}

/// Where an input element's anchors come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AnchorScope {
	/// The element is an anchor itself.
	Itself,
	/// Its `a` descendants.
	Descendants,
}

fn anchor_scope(tag_name: &str) -> AnchorScope {
	if tag_name.eq_ignore_ascii_case("a") {
		AnchorScope::Itself
	} else {
		AnchorScope::Descendants
	}
}

fn node_list_elements(list: &NodeList) -> Vec<Element> {
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

fn anchor_pair(anchor: &Element) -> (String, Option<String>) {
	(
		anchor.text_content().unwrap_or_default(),
		anchor.get_attribute("href"),
	)
}

fn collect_anchors(elements: &[Element], verbosity: LevelFilter) -> Vec<(String, Option<String>)> {
	let mut anchors = Vec::new();
	for element in elements {
		if anchor_scope(&element.tag_name()) == AnchorScope::Itself {
			anchors.push(anchor_pair(element));
			continue;
		}
		match element.query_selector_all("a") {
			Ok(list) => anchors.extend(node_list_elements(&list).iter().map(anchor_pair)),
			Err(e) => menu_log!(
				verbosity,
				Level::Warn,
				"force-menu: could not search element for anchors: {:?}",
				e
			),
		}
	}
	anchors
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_menu::types::NAVIGATION_GROUP;

	#[test]
	fn one_entry_per_anchor_keeps_text_and_href() {
		let entries = entries_from_anchors(vec![
			("Home".to_string(), Some("/".to_string())),
			("  About us\n".to_string(), Some("/about".to_string())),
			("Contact".to_string(), Some("mailto:hi@example.com".to_string())),
		]);

		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0], NavigationEntry::new("Home", "/"));
		assert_eq!(entries[1].name, "About us");
		assert_eq!(entries[1].url, "/about");
		assert_eq!(entries[2].url, "mailto:hi@example.com");
		assert!(entries.iter().all(|e| e.group == NAVIGATION_GROUP));
	}

	#[test]
	fn anchor_without_href_points_at_placeholder() {
		let entries = entries_from_anchors(vec![
			("Top".to_string(), None),
			("Empty".to_string(), Some(String::new())),
		]);
		assert_eq!(entries[0].url, ROOT_URL);
		assert_eq!(entries[1].url, ROOT_URL);
	}

	#[test]
	fn anchor_elements_count_themselves_and_others_search_inside() {
		assert_eq!(anchor_scope("A"), AnchorScope::Itself);
		assert_eq!(anchor_scope("a"), AnchorScope::Itself);
		for tag in ["NAV", "UL", "ABBR", "AREA", "div"] {
			assert_eq!(anchor_scope(tag), AnchorScope::Descendants, "{tag}");
		}
	}

	#[test]
	fn no_anchors_no_entries() {
		assert!(entries_from_anchors(Vec::new()).is_empty());
	}
}
