use std::collections::HashSet;

use lowpoly_image::{Image, ImageSize};
use lowpoly_imgproc::{
    filter::{blur, BlurMode, FilterError},
    parallel::ExecutionStrategy,
    raster::{triangle_average, triangle_average_in_place, Point, RasterError},
};

fn noise_rgb(size: ImageSize) -> Image<u8, 3> {
    let data = (0..size.width * size.height * 3)
        .map(|i| ((i * 7919) % 251) as u8)
        .collect();
    Image::new(size, data).unwrap()
}

fn opaque(src: &Image<u8, 3>) -> Image<u8, 4> {
    let data = src
        .as_slice()
        .chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 255])
        .collect();
    Image::new(src.size(), data).unwrap()
}

#[test]
fn test_two_triangles_cover_the_image() -> Result<(), RasterError> {
    let size = ImageSize {
        width: 17,
        height: 11,
    };
    let src = noise_rgb(size);
    let mut dst = Image::<u8, 4>::from_size_val(size, 0)?;

    let (w, h) = (size.width as i64, size.height as i64);
    let top_left = Point::new(0, 0);
    let top_right = Point::new(w - 1, 0);
    let bottom_left = Point::new(0, h - 1);
    let bottom_right = Point::new(w - 1, h - 1);

    let upper = triangle_average(&src, &mut dst, top_left, top_right, bottom_left)?;
    let lower = triangle_average(&src, &mut dst, top_right, bottom_right, bottom_left)?;

    // every pixel is painted by one of the two triangles
    let colors = dst
        .as_slice()
        .chunks_exact(4)
        .map(|px| {
            assert_eq!(px[3], 255);
            [px[0], px[1], px[2]]
        })
        .collect::<HashSet<_>>();
    assert!(colors.iter().all(|c| *c == upper || *c == lower));
    assert_eq!(dst.pixel(0, 0), Some(&[upper[0], upper[1], upper[2], 255][..]));
    assert_eq!(
        dst.pixel(w - 1, h - 1),
        Some(&[lower[0], lower[1], lower[2], 255][..])
    );
    Ok(())
}

#[test]
fn test_in_place_average_over_opaque_copy() -> Result<(), RasterError> {
    let size = ImageSize {
        width: 12,
        height: 9,
    };
    let src = noise_rgb(size);
    let mut img = opaque(&src);
    let (a, b, c) = (Point::new(2, 1), Point::new(11, 5), Point::new(0, 8));

    let mut expected = img.clone();
    let color = triangle_average(&src, &mut expected, a, b, c)?;
    assert_eq!(triangle_average_in_place(&mut img, a, b, c)?, color);
    assert_eq!(img, expected);

    // pixels outside the triangle keep the source colors
    let outside = [
        src.get_pixel(11, 0, 0)?,
        src.get_pixel(11, 0, 1)?,
        src.get_pixel(11, 0, 2)?,
        255,
    ];
    assert_eq!(img.pixel(11, 0), Some(&outside[..]));
    Ok(())
}

#[test]
fn test_blur_painted_triangle_is_mirror_symmetric() -> Result<(), Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: 21,
        height: 15,
    };
    let src = Image::<u8, 3>::from_size_val(size, 200)?;
    let mut painted = Image::<u8, 4>::from_size_val(size, 0)?;

    // symmetric around the column x = 10
    triangle_average(
        &src,
        &mut painted,
        Point::new(10, 1),
        Point::new(1, 13),
        Point::new(19, 13),
    )?;

    for sigma in [0.7, 2.0] {
        for mode in [BlurMode::Exact, BlurMode::BoxApproximation { passes: 3 }] {
            let blurred = blur(&painted, sigma, mode, ExecutionStrategy::Auto)?;
            for y in 0..size.height as i64 {
                for x in 0..size.width as i64 {
                    assert_eq!(
                        blurred.pixel(x, y),
                        blurred.pixel(size.width as i64 - 1 - x, y),
                        "sigma {sigma} mode {mode:?} pixel ({x}, {y})"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_blur_strategies_agree() -> Result<(), FilterError> {
    let src = noise_rgb(ImageSize {
        width: 40,
        height: 23,
    });

    let reference = blur(&src, 1.8, BlurMode::Exact, ExecutionStrategy::Serial)?;
    for strategy in [
        ExecutionStrategy::Auto,
        ExecutionStrategy::Parallel,
        ExecutionStrategy::Fixed(1),
        ExecutionStrategy::Fixed(3),
    ] {
        assert_eq!(
            blur(&src, 1.8, BlurMode::Exact, strategy)?,
            reference,
            "strategy {strategy:?}"
        );
    }
    Ok(())
}

#[test]
fn test_blur_does_not_touch_source() -> Result<(), FilterError> {
    let src = noise_rgb(ImageSize {
        width: 9,
        height: 9,
    });
    let before = src.clone();
    let _ = blur(&src, 3.0, BlurMode::default(), ExecutionStrategy::default())?;
    assert_eq!(src, before);
    Ok(())
}
