//! Errors raised while constructing a menu.

use thiserror::Error;

/// Why a menu could not be built.
#[derive(Debug, Error)]
pub enum MenuError {
	/// The host lacks something the menu needs to draw. Construction aborts.
	#[error("force-menu: rendering unavailable: {0}")]
	RenderingUnavailable(&'static str),
	/// Options JSON did not parse.
	#[error("force-menu: invalid options: {0}")]
	InvalidOptions(#[source] serde_json::Error),
	/// Navigation data JSON did not parse.
	#[error("force-menu: invalid navigation data: {0}")]
	InvalidData(#[source] serde_json::Error),
}
