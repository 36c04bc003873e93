use avm::{
    canvas::compose,
    image::{Image, ImageSize},
    imgproc::alpha::count_opaque,
    io::png::{read_image_png_rgba8, write_image_png_rgba8},
    view::process_view,
    AvmError, CameraRole, Frame, FrameSet, FrameSlots, Placement, RigConfig, TopViewProcessor,
};

// red in BGR order
const RED: [u8; 3] = [0, 0, 255];
const RED_OPAQUE: [u8; 4] = [0, 0, 255, 255];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn red_frame() -> Result<Frame, AvmError> {
    Ok(Frame::from_size_pixel([640, 480].into(), RED)?)
}

fn inside(x: usize, y: usize, placement: Placement, size: ImageSize) -> bool {
    x >= placement.x
        && x < placement.x + size.width
        && y >= placement.y
        && y < placement.y + size.height
}

#[test]
fn red_frames_end_to_end() -> Result<(), AvmError> {
    init_logger();
    let config = RigConfig::default();
    let processor = TopViewProcessor::new(config.clone())?;

    let frame = red_frame()?;
    let frames = FrameSet::new(&frame, &frame, &frame, &frame);
    let canvas = processor.process_frame_set(&frames, None)?;
    let image = canvas.as_image();
    assert_eq!(canvas.size(), [1080, 1090].into());

    // every opaque pixel is red and lies inside one of the placements
    for y in 0..image.height() {
        for x in 0..image.width() {
            let pixel = image.pixel(x, y)?;
            if pixel[3] == 0 {
                continue;
            }
            assert_eq!(pixel, &RED_OPAQUE, "at ({x}, {y})");
            let covered = CameraRole::ALL.iter().any(|&role| {
                let camera = config.camera(role);
                inside(
                    x,
                    y,
                    camera.placement,
                    camera.view_size(config.rectified_size),
                )
            });
            assert!(covered, "opaque pixel outside the placements at ({x}, {y})");
        }
    }

    // one point in the opaque region of each view
    for (x, y) in [(547, 400), (542, 689), (400, 542), (689, 547)] {
        assert_eq!(image.pixel(x, y)?, &RED_OPAQUE);
    }
    for (x, y) in [(100, 100), (1000, 100), (100, 1000), (1000, 1000)] {
        assert_eq!(image.pixel(x, y)?, &[0, 0, 0, 0]);
    }

    let cropped = processor.crop_sides(&canvas, 225)?;
    assert_eq!(cropped.size(), [630, 1090].into());
    let cropped_image = cropped.as_image();
    for y in [0, 300, 545, 1089] {
        for x in 0..630 {
            assert_eq!(cropped_image.pixel(x, y)?, image.pixel(x + 225, y)?);
        }
    }

    Ok(())
}

#[test]
fn compose_order_is_irrelevant_without_overlap() -> Result<(), AvmError> {
    let config = RigConfig::default();
    let frame = red_frame()?;
    let views = CameraRole::ALL
        .iter()
        .map(|&role| process_view(&frame, config.camera(role), config.rectified_size))
        .collect::<Result<Vec<_>, _>>()?;

    // the default placements overlap at the corners, where the order picks the winner,
    // so lay the views out side by side: front and rear on top, left and right below
    let placements = [
        Placement::new(0, 0),
        Placement::new(640, 0),
        Placement::new(0, 480),
        Placement::new(480, 480),
    ];
    let size = ImageSize {
        width: 1280,
        height: 1120,
    };

    let forward = compose(size, views.iter().zip(placements))?;
    let backward = compose(size, views.iter().zip(placements).rev())?;
    let shuffled = compose(
        size,
        [2, 0, 3, 1].map(|i| (&views[i], placements[i])),
    )?;

    assert_eq!(forward, backward);
    assert_eq!(forward, shuffled);

    let opaque: usize = views.iter().map(|v| count_opaque(v.as_image())).sum();
    assert_eq!(count_opaque(forward.as_image()), opaque);
    Ok(())
}

#[test]
fn frame_slots_drive_the_processor() -> Result<(), AvmError> {
    init_logger();
    let processor = TopViewProcessor::new(RigConfig::default())?;
    let mut slots = FrameSlots::default();

    let frame = red_frame()?;
    for role in [CameraRole::Front, CameraRole::Rear, CameraRole::Left] {
        slots.update(role, frame.clone());
        assert!(slots.frame_set().is_none());
    }
    slots.update(CameraRole::Right, frame.clone());

    let first = match slots.frame_set() {
        Some(frames) => processor.process_frame_set(&frames, None)?,
        None => panic!("all four frames are present"),
    };

    // a new front frame alone triggers a new pass with the old side frames
    slots.update(CameraRole::Front, Frame::from_size_val([640, 480].into(), 0)?);
    let second = match slots.frame_set() {
        Some(frames) => processor.process_frame_set(&frames, None)?,
        None => panic!("slots are kept after a pass"),
    };

    assert_eq!(first.as_image().pixel(547, 100)?, &RED_OPAQUE);
    assert_eq!(second.as_image().pixel(547, 100)?, &[0, 0, 0, 0]);
    assert_eq!(second.as_image().pixel(400, 542)?, &RED_OPAQUE);
    Ok(())
}

#[test]
fn vehicle_icon_from_file() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let tmp_dir = tempfile::tempdir()?;
    let icon_path = tmp_dir.path().join("vehicle.png");
    let output_path = tmp_dir.path().join("top_view.png");

    // opaque body with a transparent border
    let mut icon = Image::<u8, 4>::from_size_val([50, 50].into(), 0)?;
    for y in 10..40 {
        for x in 10..40 {
            let offset = (y * 50 + x) * 4;
            icon.as_slice_mut()[offset..offset + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
    }
    write_image_png_rgba8(&icon_path, &icon)?;

    let processor = TopViewProcessor::new(RigConfig::default())?;
    let frame = red_frame()?;
    let frames = FrameSet::new(&frame, &frame, &frame, &frame);
    let canvas = processor.process_frame_set_with_icon_path(&frames, Some(&icon_path))?;

    // center of the footprint is the icon, its corner is the camera view below it
    let image = canvas.as_image();
    assert_eq!(image.pixel(540, 545)?, &[255, 255, 255, 255]);
    assert_eq!(image.pixel(466, 451)?, &RED_OPAQUE);

    let cropped = processor.crop(&canvas)?.into_image();
    write_image_png_rgba8(&output_path, &cropped)?;
    assert_eq!(read_image_png_rgba8(&output_path)?, cropped);
    Ok(())
}

#[test]
fn rectified_size_is_fixed() -> Result<(), AvmError> {
    let config = RigConfig::default();
    for size in [[320, 240], [1920, 1080], [3, 700]] {
        let frame = Frame::from_size_pixel(size.into(), RED)?;
        let view = process_view(&frame, &config.front, config.rectified_size)?;
        assert_eq!(view.size(), config.rectified_size);
    }
    Ok(())
}
