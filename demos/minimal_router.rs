/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Minimal host wiring: an in-process router driving two views.
//!
//! The host keeps a queue of pending locations. `navigate_to` pushes onto
//! the queue through the sink; the router pops, matches the path to a view
//! type, and lets the navigator inject the query parameters.
//!
//! Run with `cargo run --example minimal_router`.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use routebind::{LocationCodec, NavigationTarget, Navigator, ParamBinding, RawParams};

#[derive(Debug, Default)]
struct InventoryView {
    id: i32,
    page: u32,
    tags: Vec<String>,
}

impl NavigationTarget for InventoryView {
    fn route() -> &'static str {
        "inventory"
    }

    fn bindings() -> Vec<ParamBinding<Self>> {
        vec![
            ParamBinding::scalar("id", |v: &mut Self, id: i32| v.id = id).required(),
            ParamBinding::scalar("page", |v: &mut Self, page: u32| v.page = page)
                .with_default("1"),
            ParamBinding::list("tag", |v: &mut Self, tags| v.tags = tags),
        ]
    }
}

#[derive(Debug, Default)]
struct SearchView {
    query: String,
    exact: Option<bool>,
}

impl NavigationTarget for SearchView {
    fn route() -> &'static str {
        "search"
    }

    fn bindings() -> Vec<ParamBinding<Self>> {
        vec![
            ParamBinding::scalar("q", |v: &mut Self, q: String| v.query = q).required(),
            ParamBinding::optional("exact", |v: &mut Self, exact| v.exact = exact),
        ]
    }
}

type PendingLocations = Arc<Mutex<VecDeque<String>>>;

/// The host's half of the contract: match the path, build the view, enter.
fn route(navigator: &Navigator<impl routebind::LocationSink>, location: &str) {
    let (path, _query) = LocationCodec::split_location(location);
    let entered = match path {
        "inventory" => {
            let mut view = InventoryView::default();
            navigator.enter(&mut view, location).map(|_| println!("  -> {view:?}"))
        }
        "search" => {
            let mut view = SearchView::default();
            navigator.enter(&mut view, location).map(|_| println!("  -> {view:?}"))
        }
        other => {
            println!("  -> no view mounted at {other:?}");
            return;
        }
    };
    if let Err(err) = entered {
        println!("  -> rejected: {err}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pending: PendingLocations = Arc::new(Mutex::new(VecDeque::new()));
    let queue = pending.clone();
    let mut navigator = Navigator::new(move |location: &str| {
        queue.lock().push_back(location.to_string());
    });

    let params = navigator
        .params()
        .set("id", 42i32)?
        .set_all("tag", ["new".to_string(), "sale".to_string()])?
        .finish();
    navigator.navigate_to_target::<InventoryView>(&params);

    let params = navigator
        .params()
        .set("q", "parameter injection".to_string())?
        .set("exact", true)?
        .finish();
    navigator.navigate_to_target::<SearchView>(&params);

    // A location typed by hand, with a decoding problem and a missing
    // required parameter.
    navigator.navigate_to("inventory", &RawParams::from_pairs([("id", "forty-two")]));
    navigator.navigate_to("search", &RawParams::new());

    loop {
        let next = pending.lock().pop_front();
        let Some(location) = next else { break };
        println!("opening {location}");
        route(&navigator, &location);
    }

    Ok(())
}
