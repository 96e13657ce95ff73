use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use roundel::{
    AvatarStyle, AvatarView, ColorAttr, CompositorKind, Density, MeasureSpec, SourceImage,
    StyleAttrs, Typeface,
};

#[derive(Parser, Debug)]
#[command(name = "roundel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a circular avatar as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source image (PNG/JPEG); omit to exercise the initials fallback.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Square side in pixels, applied as an exact measure spec.
    #[arg(long, default_value_t = 200)]
    size: u32,

    /// Compositing strategy.
    #[arg(long, value_enum, default_value_t = StrategyChoice::Shader)]
    strategy: StrategyChoice,

    /// Style attributes as inline JSON, e.g. '{"borderWidth":4,"initials":"AB"}'.
    #[arg(long)]
    attrs: Option<String>,

    /// Border ring width in pixels (overrides --attrs).
    #[arg(long)]
    border_width: Option<f32>,

    /// Border ring color as #RRGGBB[AA] (overrides --attrs).
    #[arg(long)]
    border_color: Option<String>,

    /// Initials for the no-source fallback (overrides --attrs).
    #[arg(long)]
    initials: Option<String>,

    /// Font file for the initials fallback.
    #[arg(long, default_value = "assets/fonts/DejaVuSans.ttf")]
    font: PathBuf,

    /// Display density used for dp-denominated defaults.
    #[arg(long, default_value_t = 1.0)]
    density: f32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyChoice {
    Mask,
    Shader,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_attrs(args: &RenderArgs) -> anyhow::Result<StyleAttrs> {
    let mut attrs = match &args.attrs {
        Some(json) => StyleAttrs::from_json(json).with_context(|| "parse --attrs JSON")?,
        None => StyleAttrs::default(),
    };
    if let Some(w) = args.border_width {
        attrs.border_width = Some(w);
    }
    if let Some(c) = &args.border_color {
        let color: ColorAttr = serde_json::from_value(serde_json::Value::String(c.clone()))
            .with_context(|| format!("parse --border-color '{c}'"))?;
        attrs.border_color = Some(color);
    }
    if let Some(i) = &args.initials {
        attrs.initials = Some(i.clone());
    }
    Ok(attrs)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let attrs = parse_attrs(&args)?;
    let density = Density(args.density);
    let style = AvatarStyle::resolve(&attrs, density);
    let kind = match args.strategy {
        StrategyChoice::Mask => CompositorKind::Mask,
        StrategyChoice::Shader => CompositorKind::Shader,
    };

    let mut view = AvatarView::new(style, density, kind);
    let side = view.resolve_size(MeasureSpec::exactly(args.size));
    view.on_resize(side)?;

    match std::fs::read(&args.font) {
        Ok(bytes) => view.set_typeface(Typeface::from_bytes(bytes)?)?,
        Err(e) => eprintln!(
            "no typeface loaded from '{}': {e}; the fallback draws the circle only",
            args.font.display()
        ),
    }

    if let Some(path) = &args.image {
        let img = image::open(path)
            .with_context(|| format!("open source image '{}'", path.display()))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        view.set_source_image(SourceImage::from_rgba8(w, h, img.into_raw())?)?;
    }

    let frame = view.render()?;
    let data = frame.to_straight_rgba8()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
