use super::*;
use crate::foundation::core::Density;

fn solid_source(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        data.extend_from_slice(&rgba);
    }
    SourceImage::from_rgba8(w, h, data).unwrap()
}

fn px(buf: &PixelBuffer, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * buf.width + x) * 4) as usize;
    [buf.data[i], buf.data[i + 1], buf.data[i + 2], buf.data[i + 3]]
}

#[test]
fn rebuild_composites_source_through_the_circle() {
    let mut mc = MaskCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(64, 4.0);
    let style = AvatarStyle::default_at(Density(1.0));
    // Non-square on purpose: both axes stretch independently.
    let source = solid_source(32, 16, [255, 0, 0, 255]);

    mc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&source),
        &style,
        None,
    )
    .unwrap();

    let result = mc.result.as_ref().unwrap();
    assert_eq!((result.width, result.height), (64, 64));
    assert_eq!(result.format, PixelFormat::Rgba8Premul);
    assert_eq!(px(result, 32, 32), [255, 0, 0, 255]);
    for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
        assert_eq!(px(result, x, y)[3], 0, "corner ({x},{y}) must be clipped");
    }

    let mask = mc.mask.as_ref().unwrap();
    assert_eq!(mask.format, PixelFormat::Alpha8);
    assert_eq!(mask.data[32 * 64 + 32], 255);
    assert_eq!(mask.data[0], 0);
}

#[test]
fn rebuild_without_source_keeps_previous_products() {
    let mut mc = MaskCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(32, 2.0);
    let style = AvatarStyle::default_at(Density(1.0));

    // From a cold start there is nothing to keep and nothing to build.
    mc.rebuild(&mut raster_ctx, &mut shaper, geometry, None, &style, None)
        .unwrap();
    assert!(mc.result.is_none());

    let source = solid_source(8, 8, [0, 255, 0, 255]);
    mc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&source),
        &style,
        None,
    )
    .unwrap();
    let before = mc.result.as_ref().unwrap().data.as_ptr();

    mc.rebuild(&mut raster_ctx, &mut shaper, geometry, None, &style, None)
        .unwrap();
    let after = mc.result.as_ref().unwrap().data.as_ptr();
    assert_eq!(before, after);

    // A sourceless rebuild at another side drops the now-mismatched products.
    let smaller = Geometry::new(16, 2.0);
    mc.rebuild(&mut raster_ctx, &mut shaper, smaller, None, &style, None)
        .unwrap();
    assert!(mc.result.is_none());
    assert!(mc.mask.is_none());
}

#[test]
fn mask_survives_source_swaps_at_a_settled_size() {
    let mut mc = MaskCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(40, 2.0);
    let style = AvatarStyle::default_at(Density(1.0));

    let red = solid_source(8, 8, [255, 0, 0, 255]);
    mc.rebuild(&mut raster_ctx, &mut shaper, geometry, Some(&red), &style, None)
        .unwrap();
    let before = mc.mask.as_ref().unwrap().data.as_ptr();

    let green = solid_source(16, 4, [0, 255, 0, 255]);
    mc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&green),
        &style,
        None,
    )
    .unwrap();
    assert_eq!(mc.mask.as_ref().unwrap().data.as_ptr(), before);
    assert_eq!(px(mc.result.as_ref().unwrap(), 20, 20), [0, 255, 0, 255]);

    // A different side renders a fresh mask.
    let geometry = Geometry::new(24, 2.0);
    mc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&green),
        &style,
        None,
    )
    .unwrap();
    assert_eq!(mc.mask.as_ref().unwrap().width, 24);
}

#[test]
fn rebuild_is_deterministic_for_identical_inputs() {
    let mut mc = MaskCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(48, 0.0);
    let style = AvatarStyle::default_at(Density(1.0));
    let source = solid_source(48, 48, [10, 20, 200, 255]);

    mc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&source),
        &style,
        None,
    )
    .unwrap();
    let first = mc.result.as_ref().unwrap().data.clone();

    mc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&source),
        &style,
        None,
    )
    .unwrap();
    assert_eq!(mc.result.as_ref().unwrap().data, first);
}

#[test]
fn oversized_sides_error_instead_of_truncating() {
    let mut mc = MaskCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(70_000, 0.0);
    let style = AvatarStyle::default_at(Density(1.0));
    let source = solid_source(4, 4, [1, 2, 3, 255]);

    let err = mc
        .rebuild(
            &mut raster_ctx,
            &mut shaper,
            geometry,
            Some(&source),
            &style,
            None,
        )
        .unwrap_err();
    assert!(err.to_string().contains("u16"));
}
