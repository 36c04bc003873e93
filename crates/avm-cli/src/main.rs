use argh::FromArgs;
use std::{path::PathBuf, time::Instant};

use avm::{
    io::png::{read_image_png_rgb8, write_image_png_rgba8},
    CameraRole, FrameSlots, RigConfig, TopViewProcessor, VehicleIcon,
};

#[derive(FromArgs)]
/// Composite four camera images into a top-view image
struct Args {
    /// path to the front camera PNG
    #[argh(option)]
    front: PathBuf,

    /// path to the rear camera PNG
    #[argh(option)]
    rear: PathBuf,

    /// path to the left camera PNG
    #[argh(option)]
    left: PathBuf,

    /// path to the right camera PNG
    #[argh(option)]
    right: PathBuf,

    /// path to the vehicle icon PNG, drawn in the center if it can be read
    #[argh(option)]
    vehicle: Option<PathBuf>,

    /// path to a JSON rig configuration (default: built-in rig)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// columns removed from each side of the composite (default: from the rig)
    #[argh(option)]
    crop: Option<usize>,

    /// path of the output PNG (default: top_view.png)
    #[argh(option, short = 'o', default = "PathBuf::from(\"top_view.png\")")]
    output: PathBuf,

    /// number of compositing passes to run (default: 1)
    #[argh(option, short = 'n', default = "1")]
    repeat: usize,

    /// print the effective rig configuration as JSON
    #[argh(switch)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => RigConfig::from_json_file(path)?,
        None => RigConfig::default(),
    };
    if let Some(crop) = args.crop {
        config.crop_margin = crop;
    }

    let processor = TopViewProcessor::new(config)?;
    if args.print_config {
        println!("{}", processor.config().to_json_string()?);
    }

    let mut slots = FrameSlots::default();
    for (role, path) in CameraRole::ALL
        .into_iter()
        .zip([&args.front, &args.rear, &args.left, &args.right])
    {
        let frame = read_image_png_rgb8(path)?;
        log::info!("{role} frame {} from {}", frame.size(), path.display());
        slots.update(role, frame);
    }

    let icon = args.vehicle.as_deref().and_then(VehicleIcon::load_optional);

    let mut output = None;
    for pass in 0..args.repeat {
        let Some(frames) = slots.frame_set() else {
            log::warn!("missing frames for {:?}, skipping pass", slots.missing());
            continue;
        };

        let start = Instant::now();
        let canvas = processor.process_frame_set(&frames, icon.as_ref())?;
        let cropped = processor.crop(&canvas)?;
        log::info!("pass {pass}: {} in {:?}", cropped.size(), start.elapsed());

        output = Some(cropped);
    }

    if let Some(canvas) = output {
        write_image_png_rgba8(&args.output, canvas.as_image())?;
        println!("wrote {} to {}", canvas.size(), args.output.display());
    }

    Ok(())
}
