//! Trunk entry point for the peer network explorer.

use leptos::prelude::*;
use peer_network_canvas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| view! { <App /> })
}
