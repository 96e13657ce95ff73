use super::*;

#[test]
fn bounded_modes_take_the_bound_verbatim() {
    assert_eq!(resolve_size(MeasureSpec::exactly(128), 40), 128);
    assert_eq!(resolve_size(MeasureSpec::at_most(128), 40), 128);
    assert_eq!(resolve_size(MeasureSpec::exactly(0), 40), 0);
}

#[test]
fn unspecified_falls_back_to_the_default() {
    assert_eq!(resolve_size(MeasureSpec::unspecified(), 40), 40);

    // The bound is ignored entirely in this mode.
    let spec = MeasureSpec {
        mode: MeasureMode::Unspecified,
        size: 999,
    };
    assert_eq!(resolve_size(spec, 40), 40);
}
