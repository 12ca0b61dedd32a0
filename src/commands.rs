use std::path::Path;

use anyhow::{Result, anyhow, bail};
use log::info;

use crate::cli::{DetailArgs, RenderArgs};
use crate::common::ensure_parent_dir_exists;
use crate::common::io::geojson::read_boundary;
use crate::common::io::svg::SvgWriter;
use crate::map::{BoundsConfig, MapConfig, read_reservoirs, render_detail, render_map};

pub fn render(args: &RenderArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => MapConfig::from_path(path)?,
        None => MapConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(padding) = args.padding {
        config.padding = padding;
    }
    if let Some(title) = &args.title {
        config.title = title.clone();
    }
    if args.labels {
        config.labels = true;
    }
    if let Some(list) = &args.bounds {
        config.bounds = Some(BoundsConfig::from_list(list)?);
    }

    let boundary = read_boundary(&args.boundary)?;
    let reservoirs = read_reservoirs(&args.reservoirs)?;
    info!(
        "loaded boundary with {} polygon(s) and {} reservoir(s)",
        boundary.0.len(),
        reservoirs.len()
    );

    let mut writer = create_output(&args.output, args.force)?;
    render_map(&mut writer, &boundary, &reservoirs, &config)?;
    info!("wrote {}", args.output.display());
    Ok(())
}

pub fn detail(args: &DetailArgs) -> Result<()> {
    let reservoirs = read_reservoirs(&args.reservoirs)?;
    let reservoir = reservoirs
        .iter()
        .find(|r| r.name == args.name)
        .ok_or_else(|| {
            anyhow!("No reservoir named {:?} in {}", args.name, args.reservoirs.display())
        })?;

    let shape = match &args.shape {
        Some(path) => Some(read_boundary(path)?),
        None => None,
    };

    let mut writer = create_output(&args.output, args.force)?;
    render_detail(&mut writer, reservoir, shape.as_ref())?;
    info!("wrote {}", args.output.display());
    Ok(())
}

fn create_output(path: &Path, force: bool) -> Result<SvgWriter<impl std::io::Write>> {
    if path.exists() && !force {
        bail!("Output file already exists: {} (use --force to overwrite)", path.display());
    }
    ensure_parent_dir_exists(path)?;
    SvgWriter::create(path)
}
