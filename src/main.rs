use clap::{ Arg, App };
use image::{ GenericImageView, Rgb };

use std::error::Error;
use std::fs;
use std::path::Path;

use plate_finder::config::DetectorConfig;
use plate_finder::{ utils, PlateDetector };


fn main() -> Result<(), Box<dyn Error>>{
    env_logger::init();

    let matches = App::new("plate-finder")
                    .version("0.1.0")
                    .author("kingrong")
                    .about("Locate license plate regions in a photo")
                    .arg(Arg::with_name("INPUT")
                        .help("image file with license plate")
                        .required(true)
                        .index(1))
                    .arg(Arg::with_name("config")
                        .short("c")
                        .long("config")
                        .value_name("FILE")
                        .help("json file overriding detector thresholds")
                        .takes_value(true))
                    .arg(Arg::with_name("output-dir")
                        .short("o")
                        .long("output-dir")
                        .value_name("DIR")
                        .help("save every plate crop as plate_<i>.png in DIR")
                        .takes_value(true))
                    .arg(Arg::with_name("annotate")
                        .short("a")
                        .long("annotate")
                        .value_name("FILE")
                        .help("save the image with plate outlines drawn")
                        .takes_value(true))
                    .get_matches();
    let file_name = matches.value_of("INPUT").ok_or("image is required")?;

    let config = match matches.value_of("config") {
        Some(path) => DetectorConfig::from_json_file(path)?,
        None => DetectorConfig::default(),
    };
    let max_width = config.preprocess.max_width;
    let detector = PlateDetector::new(config);

    let img = image::open(file_name)?;
    let (width, height) = img.dimensions();
    log::info!("{}: {}x{}", file_name, width, height);
    let regions = detector.detect(&img)?;

    for (i, region) in regions.iter().enumerate() {
        println!(
            "plate {}: center=({:.1}, {:.1}) size={}x{} rotation={:.2} crop={}",
            i,
            region.center.x,
            region.center.y,
            region.size.width,
            region.size.height,
            region.rotation_degrees,
            if region.has_crop() { "ok" } else { "out of bounds" },
        );
    }

    if let Some(dir) = matches.value_of("output-dir") {
        fs::create_dir_all(dir)?;
        for (i, region) in regions.iter().enumerate() {
            if let Some(crop) = &region.cropped_image {
                crop.save(Path::new(dir).join(format!("plate_{}.png", i)))?;
            }
        }
    }

    if let Some(path) = matches.value_of("annotate") {
        // regions live in the coordinates of the scaled scene
        let scene = match max_width {
            Some(max_width) => utils::resize_to_max_width(&img, max_width),
            None => img,
        };
        let mut canvas = scene.to_rgb8();
        for region in &regions {
            utils::draw_plate_outline(&mut canvas, region, Rgb([255, 0, 0]));
        }
        canvas.save(path)?;
    }

    Ok(())
}
