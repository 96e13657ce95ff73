use super::*;
use crate::foundation::core::Density;
use crate::style::StyleAttrs;

fn solid_source(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        data.extend_from_slice(&rgba);
    }
    SourceImage::from_rgba8(w, h, data).unwrap()
}

#[test]
fn rebuild_with_source_builds_a_clamped_fill() {
    let mut sc = ShaderCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(64, 2.0);
    let style = AvatarStyle::default_at(Density(1.0));
    let source = solid_source(32, 16, [255, 0, 0, 255]);

    sc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        Some(&source),
        &style,
        None,
    )
    .unwrap();

    let fill = sc.fill.as_ref().unwrap();
    assert_eq!((fill.width, fill.height), (32, 16));
    assert_eq!(fill.paint.sampler.x_extend, vello_cpu::peniko::Extend::Pad);
    assert_eq!(fill.paint.sampler.y_extend, vello_cpu::peniko::Extend::Pad);
    assert!(sc.initials_run.is_none());
}

#[test]
fn rebuild_without_typeface_defers_glyph_shaping() {
    let mut sc = ShaderCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(64, 2.0);
    let style = AvatarStyle::default_at(Density(1.0));

    sc.rebuild(&mut raster_ctx, &mut shaper, geometry, None, &style, None)
        .unwrap();
    assert!(sc.fill.is_none());
    assert!(sc.initials_run.is_none());
}

#[test]
fn rebuild_shapes_the_first_initial_with_local_font_if_present() {
    let Ok(font_bytes) = std::fs::read("assets/fonts/DejaVuSans.ttf") else {
        return;
    };
    let typeface = Typeface::from_bytes(font_bytes).unwrap();

    let mut sc = ShaderCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(100, 2.0);
    let attrs = StyleAttrs {
        initials: Some("ada".to_owned()),
        ..StyleAttrs::default()
    };
    let style = AvatarStyle::resolve(&attrs, Density(1.0));

    sc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        None,
        &style,
        Some(&typeface),
    )
    .unwrap();

    let run = sc.initials_run.as_ref().unwrap();
    assert_eq!(run.glyphs.len(), 1);
    assert_eq!(run.font_size, 70.0);
    assert_eq!(run.color, INITIALS_COLOR);
    assert!(run.advance > 0.0);
}

#[test]
fn default_initials_shape_a_question_mark() {
    let Ok(font_bytes) = std::fs::read("assets/fonts/DejaVuSans.ttf") else {
        return;
    };
    let typeface = Typeface::from_bytes(font_bytes).unwrap();

    let mut sc = ShaderCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let mut shaper = TextShaper::new();
    let geometry = Geometry::new(100, 2.0);
    // "??" falls out of the empty bundle; only its first character shapes.
    let style = AvatarStyle::default_at(Density(1.0));

    sc.rebuild(
        &mut raster_ctx,
        &mut shaper,
        geometry,
        None,
        &style,
        Some(&typeface),
    )
    .unwrap();

    let run = sc.initials_run.as_ref().unwrap();
    assert_eq!(run.glyphs.len(), 1);
}

#[test]
fn fallback_draws_the_colored_circle_even_without_glyphs() {
    let sc = ShaderCompositor::new();
    let mut raster_ctx = Rasterizer::new();
    let geometry = Geometry::new(32, 0.0);

    let mut pm = vello_cpu::Pixmap::new(32, 32);
    raster_ctx
        .with_ctx(32, 32, |ctx| {
            sc.draw_content(ctx, geometry)?;
            ctx.flush();
            ctx.render_to_pixmap(&mut pm);
            Ok(())
        })
        .unwrap();

    let data = pm.data_as_u8_slice();
    let center = (16 * 32 + 16) * 4;
    assert_eq!(&data[center..center + 4], &[0, 0, 255, 255]);
    assert_eq!(data[3], 0, "corner stays transparent");
}
