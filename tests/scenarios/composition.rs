use routebind::{RawParams, ScalarError};
use time::macros::date;

use super::harness::{InventoryView, ScenarioHost};

#[test]
fn builder_composes_location_in_declaration_order() {
    let host = ScenarioHost::new();
    let params = host
        .navigator
        .params()
        .set("id", 42i32)
        .unwrap()
        .set("tag", "new".to_string())
        .unwrap()
        .set("tag", "sale".to_string())
        .unwrap()
        .finish();

    assert_eq!(
        host.navigator.location_for("inventory", &params),
        "inventory?id=42&tag=new&tag=sale"
    );
}

#[test]
fn navigate_to_dispatches_the_composed_location() {
    let mut host = ScenarioHost::new();
    let params = host.navigator.params().set("id", 42i32).unwrap().finish();

    host.navigator.navigate_to("inventory", &params);
    host.navigator.navigate_to_target::<InventoryView>(&params);

    assert_eq!(host.opened(), ["inventory?id=42", "inventory?id=42"]);
}

#[test]
fn composition_percent_encodes_reserved_characters() {
    let host = ScenarioHost::new();
    let params = host
        .navigator
        .params()
        .set("q", "a&b=c d".to_string())
        .unwrap()
        .finish();

    assert_eq!(
        host.navigator.location_for("search", &params),
        "search?q=a%26b%3Dc+d"
    );
}

#[test]
fn raw_mode_passes_values_through_unencoded() {
    let host = ScenarioHost::raw_mode();
    let params = host
        .navigator
        .params()
        .raw("filter", "state:open")
        .finish();

    assert_eq!(
        host.navigator.location_for("issues", &params),
        "issues?filter=state:open"
    );
}

#[test]
fn typed_values_encode_canonically() {
    let host = ScenarioHost::new();
    let params = host
        .navigator
        .params()
        .set("day", date!(2024 - 03 - 09))
        .unwrap()
        .set("exact", true)
        .unwrap()
        .set("score", 2.5f64)
        .unwrap()
        .finish();

    assert_eq!(
        host.navigator.location_for("report", &params),
        "report?day=2024-03-09&exact=true&score=2.5"
    );
}

#[test]
fn set_all_appends_each_value_under_one_name() {
    let host = ScenarioHost::new();
    let params = host
        .navigator
        .params()
        .set_all("n", [1i32, 2, 3])
        .unwrap()
        .finish();

    assert_eq!(host.navigator.location_for("seq", &params), "seq?n=1&n=2&n=3");
}

#[test]
fn builder_rejects_unmapped_types_before_composing() {
    let host = ScenarioHost::new();
    let err = host.navigator.params().set("ch", 'x').unwrap_err();
    assert_eq!(err, ScalarError::UnsupportedType { scalar: "char" });
}

#[test]
fn empty_params_leave_the_path_bare() {
    let host = ScenarioHost::new();
    assert_eq!(
        host.navigator.location_for("inventory", &RawParams::new()),
        "inventory"
    );
}

#[test]
fn composed_location_reenters_an_equal_view() {
    let host = ScenarioHost::new();
    let params = host
        .navigator
        .params()
        .set("id", 42i32)
        .unwrap()
        .set("page", 3u32)
        .unwrap()
        .set_all("tag", ["new".to_string(), "sale".to_string()])
        .unwrap()
        .finish();
    let location = host.navigator.location_for_target::<InventoryView>(&params);

    let mut view = InventoryView::default();
    host.navigator.enter(&mut view, &location).unwrap();

    assert_eq!(
        view,
        InventoryView {
            id: 42,
            page: 3,
            tags: vec!["new".to_string(), "sale".to_string()],
        }
    );
}
