use argh::FromArgs;
use std::{path::PathBuf, str::FromStr};

use lowpoly::image::Image;
use lowpoly::imgproc::{
    filter::{self, BlurMode, DEFAULT_BOX_PASSES},
    parallel::ExecutionStrategy,
    raster::{self, Point},
};
use lowpoly::io::functional as F;

/// The operation applied to every input image.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Operation {
    Blur,
    Triangle,
}

impl Operation {
    fn suffix(&self) -> &'static str {
        match self {
            Operation::Blur => "blur",
            Operation::Triangle => "triangle",
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blur" => Ok(Operation::Blur),
            "triangle" => Ok(Operation::Triangle),
            _ => Err(format!("Invalid operation: {s}, expected blur or triangle")),
        }
    }
}

/// The blur flavour, parsed into a [`BlurMode`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Mode(BlurMode);

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Mode(BlurMode::Exact)),
            "box" => Ok(Mode(BlurMode::BoxApproximation {
                passes: DEFAULT_BOX_PASSES,
            })),
            _ => Err(format!("Invalid blur mode: {s}, expected exact or box")),
        }
    }
}

/// Three triangle vertices given as `x0,y0,x1,y1,x2,y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertices([Point; 3]);

impl FromStr for Vertices {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = s
            .split(',')
            .map(|v| v.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid vertices: {s}, {e}"))?;

        let [x0, y0, x1, y1, x2, y2] = coords[..] else {
            return Err(format!("Invalid vertices: {s}, expected 6 coordinates"));
        };

        Ok(Vertices([
            Point::new(x0, y0),
            Point::new(x1, y1),
            Point::new(x2, y2),
        ]))
    }
}

#[derive(FromArgs)]
/// Apply a low-poly primitive to images and write the result next to each input
struct Args {
    /// paths to the input images
    #[argh(positional)]
    image_paths: Vec<PathBuf>,

    /// the operation to apply: blur or triangle
    #[argh(option, default = "Operation::Blur")]
    op: Operation,

    /// the sigma of the gaussian blur, in pixels
    #[argh(option, default = "2.0")]
    sigma: f64,

    /// the blur mode: exact or box
    #[argh(option, default = "Mode(BlurMode::Exact)")]
    mode: Mode,

    /// the triangle vertices as x0,y0,x1,y1,x2,y2, defaults to the top left half of the image
    #[argh(option)]
    vertices: Option<Vertices>,

    /// the number of threads used by the blur, defaults to the global pool
    #[argh(option)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.image_paths.is_empty() {
        return Err("No input image given".into());
    }

    let strategy = args
        .threads
        .map_or(ExecutionStrategy::Auto, ExecutionStrategy::Fixed);

    for image_path in &args.image_paths {
        // read the image
        let image = F::read_image_any_rgb8(image_path)?;
        log::info!("read {} with size {}", image_path.display(), image.size());

        let output = match args.op {
            Operation::Blur => filter::blur(&image, args.sigma, args.mode.0, strategy)?,
            Operation::Triangle => {
                let [a, b, c] = match args.vertices {
                    Some(Vertices(vertices)) => vertices,
                    None => {
                        let (w, h) = (image.width() as i64, image.height() as i64);
                        [Point::new(0, 0), Point::new(w - 1, 0), Point::new(0, h - 1)]
                    }
                };

                // paint over an opaque copy of the input
                let data = image
                    .as_slice()
                    .chunks_exact(3)
                    .flat_map(|px| [px[0], px[1], px[2], 255])
                    .collect();
                let mut output = Image::<u8, 4>::new(image.size(), data)?;

                let color = raster::triangle_average(&image, &mut output, a, b, c)?;
                log::info!("triangle {a}, {b}, {c} averaged to {color:?}");
                output
            }
        };

        let output_path = F::output_path_for(image_path, args.op.suffix());
        F::write_image_png_rgba8(&output_path, &output)?;
        log::info!("wrote {}", output_path.display());
    }

    Ok(())
}
