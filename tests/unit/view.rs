use super::*;
use crate::style::StyleAttrs;

fn solid_source(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        data.extend_from_slice(&rgba);
    }
    SourceImage::from_rgba8(w, h, data).unwrap()
}

fn default_view(kind: CompositorKind) -> AvatarView {
    AvatarView::new(AvatarStyle::default_at(Density(1.0)), Density(1.0), kind)
}

#[test]
fn resolve_size_applies_the_density_default_only_when_unspecified() {
    let view = AvatarView::new(
        AvatarStyle::default_at(Density(2.5)),
        Density(2.5),
        CompositorKind::Shader,
    );
    // 2dp at density 2.5 is 5px, truncated to 5.
    assert_eq!(view.resolve_size(MeasureSpec::unspecified()), 5);
    assert_eq!(view.resolve_size(MeasureSpec::exactly(128)), 128);
    assert_eq!(view.resolve_size(MeasureSpec::at_most(64)), 64);
}

#[test]
fn unsized_views_defer_instead_of_failing() {
    let mut view = default_view(CompositorKind::Mask);
    assert_eq!(view.side(), 0);

    view.set_source_image(solid_source(4, 4, [255, 0, 0, 255]))
        .unwrap();

    let mut target = PixelBuffer::zeroed(4, 4, PixelFormat::Rgba8Premul).unwrap();
    view.draw(&mut target, (0, 0)).unwrap();
    assert!(target.data.iter().all(|&b| b == 0));

    assert!(view.render().is_err());
}

#[test]
fn same_side_resize_causes_zero_buffer_churn() {
    let mut view = default_view(CompositorKind::Mask);
    view.on_resize(64).unwrap();
    view.set_source_image(solid_source(8, 8, [0, 128, 255, 255]))
        .unwrap();

    let before = view.result_buffer().unwrap().data.as_ptr();
    view.on_resize(64).unwrap();
    let after = view.result_buffer().unwrap().data.as_ptr();
    assert_eq!(before, after);

    view.on_resize(32).unwrap();
    let rebuilt = view.result_buffer().unwrap();
    assert_eq!((rebuilt.width, rebuilt.height), (32, 32));
}

#[test]
fn zero_resize_returns_to_the_unsized_state() {
    let mut view = default_view(CompositorKind::Shader);
    view.on_resize(16).unwrap();
    assert_eq!(view.side(), 16);

    view.on_resize(0).unwrap();
    assert_eq!(view.side(), 0);
    assert!(view.render().is_err());
}

#[test]
fn border_width_reassignment_takes_effect_without_rebuild() {
    let mut view = default_view(CompositorKind::Shader);
    view.on_resize(40).unwrap();
    view.set_source_image(solid_source(4, 4, [200, 10, 10, 255]))
        .unwrap();

    let thin = view.render().unwrap();
    view.set_border_width(12.0);
    assert_eq!(view.border_width(), 12.0);
    let thick = view.render().unwrap();
    assert_ne!(thin.data, thick.data);

    view.set_border_width(-1.0);
    assert_eq!(view.border_width(), 0.0);
}

#[test]
fn draw_twice_produces_identical_bytes() {
    let mut view = default_view(CompositorKind::Mask);
    view.on_resize(48).unwrap();
    view.set_source_image(solid_source(12, 12, [30, 60, 90, 255]))
        .unwrap();

    let a = view.render().unwrap();
    let b = view.render().unwrap();
    assert_eq!(a.data, b.data);
}

#[test]
fn draw_rejects_non_rgba_targets() {
    let mut view = default_view(CompositorKind::Shader);
    view.on_resize(8).unwrap();
    let mut target = PixelBuffer::zeroed(8, 8, PixelFormat::Alpha8).unwrap();
    assert!(view.draw(&mut target, (0, 0)).is_err());
}

#[test]
fn draw_clips_to_the_target_bounds() {
    let mut view = default_view(CompositorKind::Shader);
    view.on_resize(8).unwrap();
    // Shader keeps no materialized composite.
    assert!(view.result_buffer().is_none());

    let mut target = PixelBuffer::zeroed(10, 10, PixelFormat::Rgba8Premul).unwrap();
    view.draw(&mut target, (-4, -4)).unwrap();

    // The circle's lower-right quarter lands at the target's top-left; its
    // center pixel maps to (0, 0) area coverage.
    assert!(target.data[3] > 0);
    let far = ((9 * 10 + 9) * 4 + 3) as usize;
    assert_eq!(target.data[far], 0);
}

#[test]
fn unspecified_measurement_drives_the_default_diameter_quirk() {
    let attrs = StyleAttrs {
        border_width: Some(0.0),
        ..StyleAttrs::default()
    };
    let mut view = AvatarView::new(
        AvatarStyle::resolve(&attrs, Density(1.0)),
        Density(1.0),
        CompositorKind::Shader,
    );
    let side = view.resolve_size(MeasureSpec::unspecified());
    assert_eq!(side, 2);
    view.on_resize(side).unwrap();
    let out = view.render().unwrap();
    assert_eq!((out.width, out.height), (2, 2));
}
