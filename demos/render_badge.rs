use roundel::{
    AvatarStyle, AvatarView, CompositorKind, Density, MeasureSpec, SourceImage, StyleAttrs,
    Typeface,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let attrs = StyleAttrs::from_json(r#"{"borderWidth": 6, "initials": "rk"}"#)?;
    let density = Density(2.0);
    let style = AvatarStyle::resolve(&attrs, density);

    // A 32x32 checkerboard stands in for a decoded photo.
    let mut pixels = Vec::with_capacity(32 * 32 * 4);
    for y in 0..32u32 {
        for x in 0..32u32 {
            let on = (x / 4 + y / 4) % 2 == 0;
            pixels.extend_from_slice(if on {
                &[220, 60, 40, 255]
            } else {
                &[40, 60, 220, 255]
            });
        }
    }
    let source = SourceImage::from_rgba8(32, 32, pixels)?;

    std::fs::create_dir_all("target/demo")?;
    for (kind, name) in [
        (CompositorKind::Mask, "badge_mask.png"),
        (CompositorKind::Shader, "badge_shader.png"),
    ] {
        let mut view = AvatarView::new(style.clone(), density, kind);
        let side = view.resolve_size(MeasureSpec::exactly(256));
        view.on_resize(side)?;
        view.set_source_image(source.clone())?;

        let frame = view.render()?;
        let out = format!("target/demo/{name}");
        image::save_buffer_with_format(
            &out,
            &frame.to_straight_rgba8()?,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        println!("wrote {out}");
    }

    // The fallback path needs a typeface; skip quietly when none is bundled.
    if let Ok(bytes) = std::fs::read("assets/fonts/DejaVuSans.ttf") {
        let mut view = AvatarView::new(style, density, CompositorKind::Shader);
        view.on_resize(256)?;
        view.set_typeface(Typeface::from_bytes(bytes)?)?;

        let frame = view.render()?;
        image::save_buffer_with_format(
            "target/demo/badge_initials.png",
            &frame.to_straight_rgba8()?,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        println!("wrote target/demo/badge_initials.png");
    }

    Ok(())
}
