use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use postage_stamp::{
    CancelToken, IntRect, PerforationStyle, PostageStamp, RenderThreading, StampParams, Surface,
    Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "postage-stamp", version, about = "Turn an image region into a postage stamp")]
struct Cli {
    /// Input image (any format supported by the `image` crate).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Parameter JSON; flags below override its values.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Selection as `left,top,right,bottom` (defaults to the whole image).
    #[arg(long, value_parser = parse_selection)]
    selection: Option<IntRect>,

    /// Size multiplier.
    #[arg(long)]
    scale: Option<f64>,

    /// Perforations along the top and bottom edges.
    #[arg(long)]
    perforations_x: Option<u32>,

    /// Perforations along the left and right edges.
    #[arg(long)]
    perforations_y: Option<u32>,

    /// Perforation shape.
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Placement as `x,y`, each in [-1, 1].
    #[arg(long, value_parser = parse_position)]
    position: Option<Vec2>,

    /// Draw the light perforation outline.
    #[arg(long, default_value_t = false)]
    outline: bool,

    /// Draw the mat band.
    #[arg(long, default_value_t = false)]
    mat: bool,

    /// Mat band size.
    #[arg(long)]
    mat_size: Option<u32>,

    /// Mat color as `RRGGBB` or `RRGGBBAA` hex.
    #[arg(long, value_parser = parse_color)]
    mat_color: Option<postage_stamp::Rgba8>,

    /// Render tiles in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Rows per render tile.
    #[arg(long, default_value_t = postage_stamp::DEFAULT_TILE_ROWS)]
    tile_rows: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    Curved,
    Straight,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let params = resolve_params(&cli)?;
    params.validate().context("invalid parameters")?;

    let img = image::open(&cli.in_path)
        .with_context(|| format!("read image '{}'", cli.in_path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let src = Surface::from_rgba8(width, height, img.into_raw())?;
    let selection = cli.selection.unwrap_or_else(|| src.bounds());

    let mut fx = PostageStamp::new();
    fx.rebuild(&src, selection, &params)?;

    let mut out = src.clone();
    let threading = RenderThreading {
        parallel: cli.parallel,
        threads: cli.threads,
    };
    let stats = fx.render_tiles(
        &mut out,
        &selection.split_rows(cli.tile_rows),
        &threading,
        &CancelToken::new(),
    )?;

    if let Some(parent) = cli.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &cli.out,
        out.data(),
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", cli.out.display()))?;

    eprintln!("wrote {} ({} tiles)", cli.out.display(), stats.tiles_total);
    Ok(())
}

fn resolve_params(cli: &Cli) -> anyhow::Result<StampParams> {
    let mut params = match &cli.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read params '{}'", path.display()))?;
            StampParams::from_json_str(&text)?
        }
        None => StampParams::default(),
    };

    if let Some(v) = cli.scale {
        params.scale = v;
    }
    if let Some(v) = cli.perforations_x {
        params.horizontal_perforations = v;
    }
    if let Some(v) = cli.perforations_y {
        params.vertical_perforations = v;
    }
    if let Some(v) = cli.style {
        params.perforation_style = match v {
            StyleArg::Curved => PerforationStyle::Curved,
            StyleArg::Straight => PerforationStyle::Straight,
        };
    }
    if let Some(v) = cli.position {
        params.position = v;
    }
    params.outline_enabled |= cli.outline;
    params.mat_enabled |= cli.mat;
    if let Some(v) = cli.mat_size {
        params.mat_size = v;
    }
    if let Some(v) = cli.mat_color {
        params.mat_color = v;
    }
    Ok(params)
}

fn parse_selection(s: &str) -> Result<IntRect, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<i32>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let [left, top, right, bottom] = parts[..] else {
        return Err("expected left,top,right,bottom".to_string());
    };
    IntRect::new(left, top, right, bottom).map_err(|e| e.to_string())
}

fn parse_position(s: &str) -> Result<Vec2, String> {
    let (x, y) = s.split_once(',').ok_or("expected x,y")?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Vec2::new(x, y))
}

fn parse_color(s: &str) -> Result<postage_stamp::Rgba8, String> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return Err("expected RRGGBB or RRGGBBAA".to_string());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok(postage_stamp::Rgba8::new(byte(0)?, byte(2)?, byte(4)?, a))
}
