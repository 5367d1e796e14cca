use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use lowpoly_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path and converts it to RGB8.
///
/// The method tries to read from any image format supported by the image crate. Grayscale
/// images are expanded to three channels and an alpha channel, if any, is dropped.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A RGB image with three channels (rgb8).
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} as {:?} with size {}x{}",
        file_path.display(),
        img.color(),
        img.width(),
        img.height()
    );

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes the given PNG _(rgba8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the RGBA data.
pub fn write_image_png_rgba8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 4>,
) -> Result<(), IoError> {
    write_png_impl(file_path, image.as_slice(), image.size(), image::ColorType::Rgba8)
}

/// Writes the given PNG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the RGB data.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    write_png_impl(file_path, image.as_slice(), image.size(), image::ColorType::Rgb8)
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    color_type: image::ColorType,
) -> Result<(), IoError> {
    let [width, height]: [u32; 2] = image_size.into();
    image::save_buffer_with_format(
        file_path,
        image_data,
        width,
        height,
        color_type,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Path of the PNG file written next to `input` for an operation named `suffix`.
///
/// `photos/cat.jpeg` with the suffix `blur` gives `photos/cat_blur.png`.
///
/// # Arguments
///
/// * `input` - The path of the source image.
/// * `suffix` - Appended to the file stem after an underscore.
pub fn output_path_for(input: impl AsRef<Path>, suffix: &str) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new("image"))
        .to_string_lossy();
    input.with_file_name(format!("{stem}_{suffix}.png"))
}
