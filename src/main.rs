//! Browser entry point: start logging and mount the app.

use sentiment_graph_editor::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
