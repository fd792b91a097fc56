use std::path::PathBuf;

use argh::FromArgs;
use depthify::{
    field::Sample,
    io::{
        functional::{write_image_any_rgb8, ImageFormat},
        png::write_image_png_rgba8,
    },
    viz::{ColorMap, Orientation},
    DepthExportMode, Session, SessionConfig,
};

/// Builds a depth map from depth samples placed on an image
#[derive(Debug, FromArgs)]
struct Args {
    /// path to the source image (jpg, jpeg or png)
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// a depth sample as `x,y,depth`, repeat for more samples
    #[argh(option, short = 'p')]
    point: Vec<Sample>,

    /// number of samples to undo after adding them
    #[argh(option, default = "0")]
    undo: usize,

    /// colormap of the previews: viridis, magma, inferno, plasma or gray
    #[argh(option, short = 'c', default = "ColorMap::Viridis")]
    colormap: ColorMap,

    /// where to write the depth map, defaults to `<stem>_map.<ext>`
    #[argh(option)]
    depth_map: Option<PathBuf>,

    /// where to write the composite, defaults to `<stem>_depth.<ext>`
    #[argh(option)]
    composite: Option<PathBuf>,

    /// where to write the source image with the samples drawn on it
    #[argh(option)]
    preview: Option<PathBuf>,

    /// where to write the color bar of the depth range (png)
    #[argh(option)]
    colorbar: Option<PathBuf>,

    /// orientation of the color bar: vertical or horizontal
    #[argh(option, default = "Orientation::Vertical")]
    orientation: Orientation,

    /// export the depth map through the colormap instead of raw depth bytes
    #[argh(switch)]
    colorized: bool,

    /// quality of jpeg exports
    #[argh(option, short = 'q', default = "95")]
    jpeg_quality: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let export_mode = if args.colorized {
        DepthExportMode::Colorized
    } else {
        DepthExportMode::Grayscale
    };
    let config = SessionConfig::default()
        .with_colormap(args.colormap)
        .with_depth_export_mode(export_mode)
        .with_jpeg_quality(args.jpeg_quality);

    let mut session = Session::new(config);
    session.load_image(&args.image_path)?;

    for sample in &args.point {
        session.add_point(sample.position(), sample.depth)?;
    }
    for _ in 0..args.undo {
        if session.undo()?.is_none() {
            log::warn!("nothing left to undo");
            break;
        }
    }

    log::info!(
        "{} samples on a {} image",
        session.samples().len(),
        session.image_size().map_or_else(String::new, |s| s.to_string())
    );

    let nothing_requested = args.depth_map.is_none()
        && args.composite.is_none()
        && args.preview.is_none()
        && args.colorbar.is_none();

    if nothing_requested || args.depth_map.is_some() {
        let path = session.export_depth_map(args.depth_map.as_deref())?;
        println!("depth map: {}", path.display());
    }

    if nothing_requested || args.composite.is_some() {
        let path = session.export_composite(args.composite.as_deref())?;
        println!("composite: {}", path.display());
    }

    if let Some(path) = args.preview {
        let preview = session.annotated_preview()?;
        write_image_any_rgb8(&path, &preview, session.config().jpeg_quality)?;
        println!("preview: {}", path.display());
    }

    if let Some(path) = args.colorbar {
        if ImageFormat::from_path(&path)? != ImageFormat::Png {
            return Err(format!("color bars are written as png: {}", path.display()).into());
        }
        // as long as the image side it runs along
        let length = session
            .image_size()
            .map_or(256, |size| match args.orientation {
                Orientation::Vertical => size.height,
                Orientation::Horizontal => size.width,
            });
        let bar = session.colorbar(length, 24, args.orientation)?;
        write_image_png_rgba8(&path, &bar)?;
        println!("colorbar: {}", path.display());
    }

    Ok(())
}
