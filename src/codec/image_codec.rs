use std::{borrow::Cow, io::Cursor};

use anyhow::Context as _;
use image::{
    DynamicImage, ImageDecoder as _, ImageEncoder as _, ImageReader, RgbaImage,
    codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder},
    imageops::FilterType,
    metadata::Orientation,
};

use super::{EncodedImage, FrameCodec, Pixels};

pub const PNG_MIME: &str = "image/png";

/// [`FrameCodec`] backed by the `image` crate.
///
/// Decoding applies EXIF orientation. Resizing uses Lanczos3 over premultiplied RGBA8 so
/// transparent edges do not bleed color. Output is PNG.
#[derive(Clone, Copy, Debug)]
pub struct ImageCodec {
    pub filter: FilterType,
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl ImageCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameCodec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<Pixels> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .context("sniff image format")?;
        let mut decoder = reader.into_decoder().context("open image decoder")?;
        let orientation = decoder.orientation().context("read image orientation")?;
        let mut img = DynamicImage::from_decoder(decoder).context("decode image")?;
        img.apply_orientation(orientation);

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "decoded image has zero size");

        Ok(Pixels {
            width,
            height,
            data: rgba.into_raw(),
            premultiplied: false,
        })
    }

    fn dimensions(&self, bytes: &[u8]) -> anyhow::Result<(u32, u32)> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .context("sniff image format")?;
        let mut decoder = reader.into_decoder().context("open image decoder")?;
        let (width, height) = decoder.dimensions();
        let orientation = decoder.orientation().context("read image orientation")?;
        Ok(match orientation {
            Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH => (height, width),
            _ => (width, height),
        })
    }

    fn resize(&self, pixels: Pixels, width: u32, height: u32) -> anyhow::Result<Pixels> {
        anyhow::ensure!(
            width > 0 && height > 0,
            "resize target must be non-zero, got {width}x{height}"
        );

        let Pixels {
            width: src_w,
            height: src_h,
            mut data,
            premultiplied,
        } = pixels;
        if !premultiplied {
            premultiply_rgba8_in_place(&mut data);
        }

        let src = RgbaImage::from_raw(src_w, src_h, data)
            .context("pixel buffer does not match its dimensions")?;
        let resized = image::imageops::resize(&src, width, height, self.filter);

        Ok(Pixels {
            width,
            height,
            data: resized.into_raw(),
            premultiplied: true,
        })
    }

    fn encode(&self, pixels: &Pixels) -> anyhow::Result<EncodedImage> {
        let expected = pixels.width as usize * pixels.height as usize * 4;
        anyhow::ensure!(
            pixels.data.len() == expected,
            "pixel buffer has {} bytes, expected {expected}",
            pixels.data.len()
        );

        // PNG stores straight alpha.
        let data: Cow<'_, [u8]> = if pixels.premultiplied {
            let mut buf = pixels.data.clone();
            unpremultiply_rgba8_in_place(&mut buf);
            Cow::Owned(buf)
        } else {
            Cow::Borrowed(pixels.data.as_slice())
        };

        let mut bytes = Vec::new();
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, PngFilter::Adaptive)
            .write_image(
                &data,
                pixels.width,
                pixels.height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode png")?;

        Ok(EncodedImage {
            mime: PNG_MIME,
            bytes,
        })
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        match a {
            0 => {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
            }
            255 => {}
            _ => {
                for c in &mut px[..3] {
                    *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/image_codec.rs"]
mod tests;
