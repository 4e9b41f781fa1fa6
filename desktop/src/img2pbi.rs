use argh::FromArgs;
use log::{debug, info, warn};
use pbigen_core::{ColorMap, Encoder, Image, MapKind, fs::Filesystem};

use crate::{decoded::DecodedImage, std_fs::StdFilesystem};

mod decoded;
mod std_fs;

#[derive(FromArgs)]
/// Convert an image to a Pebble PBI bitmap
struct Args {
    /// input image path
    #[argh(option, short = 'i')]
    input_path: String,

    /// output PBI file path, defaults to the input path with `.pbi` appended
    #[argh(option, short = 'o')]
    output_path: Option<String>,

    /// color map, `white` sets white pixels and `black` sets black pixels
    #[argh(option, short = 'm', default = "MapKind::White")]
    map: MapKind,

    /// ignore the alpha channel
    #[argh(switch)]
    opaque: bool,

    /// report how many pixels and distinct colors were converted
    #[argh(switch, short = 's')]
    stats: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let mut image = DecodedImage::open(&args.input_path).expect("Failed to open input image");
    if args.opaque {
        image = image.opaque();
    }
    let map_name: &'static str = args.map.into();
    info!(
        "Converting {} ({}x{}, alpha: {}) with {} map",
        args.input_path,
        image.width(),
        image.height(),
        image.has_alpha(),
        map_name
    );

    let encoder = Encoder::new(&image, ColorMap::from(args.map))
        .expect("Input image is too large for a PBI bitmap");
    debug!("Encoding region {:?}", encoder.region());

    let output_path = args
        .output_path
        .unwrap_or_else(|| format!("{}.pbi", args.input_path));
    let fs = StdFilesystem::new_with_base_path(".".into());
    if fs.exists(&output_path).unwrap_or(false) {
        warn!("Overwriting {}", output_path);
    }

    let (written, stats) = encoder
        .save(&fs, &output_path, &image)
        .expect("Failed to write PBI file");
    info!("Wrote {} bytes to {}", written, output_path);

    if args.stats {
        info!("Pixels converted: {}", stats.total_pixels());
        info!("Distinct colors: {}", stats.distinct_count());
        for raw in stats.distinct_values() {
            debug!("  #{:08X}", raw);
        }
    }
}
