use drill_core::model::{Operator, Problem};

use super::test_harness::setup_drill_harness;

#[tokio::test(flavor = "current_thread")]
async fn drill_view_smoke_renders_first_problem() {
    let mut harness = setup_drill_harness(&[Problem::new(7, 3, Operator::Subtract).unwrap()]);
    harness.rebuild();
    let html = harness.render();

    for expected in ["Problem 1", "7 - 3 = ?", "00:00", "Accuracy: 0%"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(
        html.contains("No wrong answers yet"),
        "missing empty mistakes hint in {html}"
    );
    assert!(!html.contains("Correct!"), "unexpected celebration in {html}");
}
