//! Image materialization: validating a source image and storing it in an album
//!
//! | Mode | Output |
//! |---|---|
//! | [`Copy`](MaterializeMode::Copy) | source bytes, unchanged |
//! | [`Normalize`](MaterializeMode::Normalize) | alpha flattened onto white, JPEG q85 |
//!
//! Thumbnails fit inside a square box and are never enlarged.
//!
//! Output is staged next to the destination and only becomes visible on
//! [`StagedFile::commit`], so callers can abandon it if a later step fails.

use crate::config::{MaterializeMode, NORMALIZE_JPEG_QUALITY};
use crate::error::{GalleryError, Result};
use crate::io::StagedFile;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageEncoder, ImageFormat, ImageReader, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// A source image that passed validation
#[derive(Debug, Clone)]
pub struct SourceImage {
    path: PathBuf,
    image: DynamicImage,
    format: Option<ImageFormat>,
}

impl SourceImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Format sniffed from the file content
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }
}

/// Turns source images into stored gallery images
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageMaterializer {
    mode: MaterializeMode,
}

impl ImageMaterializer {
    pub fn new(mode: MaterializeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MaterializeMode {
        self.mode
    }

    /// Check that `source` exists and decodes as a raster image
    pub fn validate(&self, source: &Path) -> Result<SourceImage> {
        if !source.is_file() {
            return Err(GalleryError::input_not_found(source));
        }
        load_image(source)
    }

    /// Write the stored form of `source` to a staging file for `destination`
    pub fn stage(&self, source: &SourceImage, destination: &Path) -> Result<StagedFile> {
        let bytes = match self.mode {
            MaterializeMode::Copy => std::fs::read(&source.path)?,
            MaterializeMode::Normalize => {
                encode_jpeg(&flatten_onto_white(&source.image), &source.path)?
            }
        };
        self.stage_bytes(source, destination, &bytes)
    }

    /// Stage a thumbnail of `source` that fits inside `max_size` x `max_size`.
    ///
    /// Smaller images are not enlarged. The thumbnail keeps the source format,
    /// or is a JPEG in normalize mode.
    pub fn stage_thumbnail(
        &self,
        source: &SourceImage,
        destination: &Path,
        max_size: u32,
    ) -> Result<StagedFile> {
        let img = &source.image;
        let thumb = if img.width() > max_size || img.height() > max_size {
            img.resize(max_size, max_size, FilterType::Lanczos3)
        } else {
            img.clone()
        };

        let bytes = match (self.mode, source.format) {
            (MaterializeMode::Normalize, _) | (MaterializeMode::Copy, Some(ImageFormat::Jpeg)) => {
                encode_jpeg(&flatten_onto_white(&thumb), &source.path)?
            }
            (MaterializeMode::Copy, format) => {
                encode_as(&thumb, format.unwrap_or(ImageFormat::Png), &source.path)?
            }
        };
        self.stage_bytes(source, destination, &bytes)
    }

    /// Validate and store `source` at `destination` in one step
    pub fn materialize(&self, source: &Path, destination: &Path) -> Result<()> {
        let source = self.validate(source)?;
        self.stage(&source, destination)?.commit()
    }

    fn stage_bytes(
        &self,
        source: &SourceImage,
        destination: &Path,
        bytes: &[u8],
    ) -> Result<StagedFile> {
        let mut staged = StagedFile::new(destination)?;
        staged.write_all(bytes)?;
        log::debug!(
            "staged {} -> {} ({:?}, {} bytes)",
            source.path.display(),
            destination.display(),
            self.mode,
            bytes.len()
        );
        Ok(staged)
    }
}

/// Decode an image from disk, sniffing the format from its content
fn load_image(path: &Path) -> Result<SourceImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let image = reader
        .decode()
        .map_err(|e| GalleryError::invalid_image(path, e.to_string()))?;
    Ok(SourceImage {
        path: path.to_path_buf(),
        image,
        format,
    })
}

/// Composite an image onto an opaque white background.
///
/// Images without alpha are only converted to 8-bit RGB.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

fn encode_jpeg(img: &RgbImage, source: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, NORMALIZE_JPEG_QUALITY)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| GalleryError::invalid_image(source, format!("JPEG encoding failed: {}", e)))?;
    Ok(buf)
}

fn encode_as(img: &DynamicImage, format: ImageFormat, source: &Path) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).map_err(|e| {
        GalleryError::invalid_image(source, format!("{:?} encoding failed: {}", format, e))
    })?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn create_test_png_with_alpha(path: &Path) {
        let img = RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([10, 20, 30, 255])
            }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
        let flat = flatten_onto_white(&img);
        assert_eq!(flat.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_flatten_opaque_keeps_color() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255])));
        assert_eq!(flatten_onto_white(&img).get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_flatten_half_alpha_blends() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128])));
        let px = flatten_onto_white(&img).get_pixel(0, 0).0;
        assert_eq!(px, [127, 127, 127]);
    }

    #[test]
    fn test_missing_source() {
        let err = ImageMaterializer::default()
            .validate(Path::new("/nonexistent/cat.jpg"))
            .unwrap_err();
        assert!(matches!(err, GalleryError::InputNotFound { .. }));
    }

    #[test]
    fn test_garbage_source_is_invalid_image() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("cat.jpg");
        std::fs::write(&src, b"definitely not a jpeg").unwrap();

        let err = ImageMaterializer::default().validate(&src).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidImage { .. }));
    }

    #[test]
    fn test_normalize_drops_alpha() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("logo.png");
        let dest = dir.path().join("out/logo.png");
        create_test_png_with_alpha(&src);

        ImageMaterializer::new(MaterializeMode::Normalize)
            .materialize(&src, &dest)
            .unwrap();

        let stored = ImageReader::open(&dest)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(stored.format(), Some(image::ImageFormat::Jpeg));
        let decoded = stored.decode().unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!(decoded.width(), 8);
    }

    #[test]
    fn test_copy_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("logo.png");
        let dest = dir.path().join("albums/x/logo.png");
        create_test_png_with_alpha(&src);

        ImageMaterializer::new(MaterializeMode::Copy)
            .materialize(&src, &dest)
            .unwrap();
        assert_eq!(std::fs::read(&src).unwrap(), std::fs::read(&dest).unwrap());
    }

    #[test]
    fn test_failed_validation_has_no_side_effects() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("bad.png");
        let dest = dir.path().join("albums/x/bad.png");
        std::fs::write(&src, b"nope").unwrap();

        assert!(ImageMaterializer::default().materialize(&src, &dest).is_err());
        assert!(!dest.parent().unwrap().exists());
    }

    #[test]
    fn test_thumbnail_fits_box_and_keeps_format() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("wide.png");
        RgbaImage::from_pixel(1000, 500, Rgba([1, 2, 3, 255]))
            .save(&src)
            .unwrap();
        let dest = dir.path().join("thumbs/wide.png");

        let materializer = ImageMaterializer::default();
        let source = materializer.validate(&src).unwrap();
        assert_eq!(source.format(), Some(image::ImageFormat::Png));
        materializer
            .stage_thumbnail(&source, &dest, 400)
            .unwrap()
            .commit()
            .unwrap();

        let thumb = ImageReader::open(&dest)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(thumb.format(), Some(image::ImageFormat::Png));
        let thumb = thumb.decode().unwrap();
        assert_eq!((thumb.width(), thumb.height()), (400, 200));
    }

    #[test]
    fn test_small_image_thumbnail_is_not_enlarged() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("tiny.png");
        create_test_png_with_alpha(&src);
        let dest = dir.path().join("thumbs/tiny.png");

        let materializer = ImageMaterializer::new(MaterializeMode::Normalize);
        let source = materializer.validate(&src).unwrap();
        materializer
            .stage_thumbnail(&source, &dest, 400)
            .unwrap()
            .commit()
            .unwrap();

        let thumb = ImageReader::open(&dest)
            .unwrap()
            .with_guessed_format()
            .unwrap();
        assert_eq!(thumb.format(), Some(image::ImageFormat::Jpeg));
        assert_eq!(thumb.decode().unwrap().width(), 8);
    }

    #[test]
    fn test_oversized_jpeg_reports_invalid_image() {
        let img = RgbImage::new(70_000, 1);
        let err = encode_jpeg(&img, Path::new("huge.png")).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidImage { .. }));
    }
}
