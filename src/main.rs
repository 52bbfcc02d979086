//! Client entrypoint for the CSR demo build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use force_menu::{App, init_logging};
use leptos::prelude::*;
use log::Level;

fn main() {
	init_logging(Level::Debug);

	mount_to_body(|| {
		view! { <App /> }
	})
}
