mod composition;
mod harness;
mod roundtrip;

use routebind::VERSION;

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}
