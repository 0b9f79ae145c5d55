//! Photon Starfield: posts ("photons") plotted by year and company on an
//! animated canvas sky.
//!
//! The reusable part is [`components::starfield`]; the pages only host it
//! with sample data.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Routes `log` to the browser console and installs the panic hook.
///
/// Debug builds log at `Debug` so per-frame skip causes and loop start/stop
/// show up; release builds stop at `Info`.
pub fn init_logging() {
	let level = if cfg!(debug_assertions) {
		Level::Debug
	} else {
		Level::Info
	};
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("photon-starfield {} starting", env!("CARGO_PKG_VERSION"));
}

/// Document head plus the router: the starfield at `/`, a 404 page elsewhere.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Photon Starfield" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="Moments and predictions from people building autonomous driving, as stars on a timeline." />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
