//! Decoding background images and encoding surface snapshots.
//!
//! Hosts that own a pixel buffer use these to turn a document's `imageData`
//! (or an image file) into RGBA pixels, and to produce the PNG data URI
//! written on save.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Image source errors.
#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("Not a data URL")]
    NotDataUrl,
    #[error("Unsupported data URL encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}

/// A parsed `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub data: Vec<u8>,
}

impl DataUrl {
    pub fn parse(url: &str) -> Result<Self, ImageSourceError> {
        let rest = url.trim().strip_prefix("data:").ok_or(ImageSourceError::NotDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageSourceError::NotDataUrl)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| ImageSourceError::UnsupportedEncoding(header.to_string()))?;

        Ok(Self {
            mime: mime.to_string(),
            data: STANDARD.decode(payload)?,
        })
    }

    pub fn to_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}

/// Decode a base64 data URL into RGBA pixels.
pub fn decode_data_url(url: &str) -> Result<RgbaImage, ImageSourceError> {
    let data_url = DataUrl::parse(url)?;
    Ok(image::load_from_memory(&data_url.data)?.to_rgba8())
}

/// Decode an image file into RGBA pixels.
pub fn load_file(path: impl AsRef<Path>) -> Result<RgbaImage, ImageSourceError> {
    let path = path.as_ref();
    log::info!("Loading background image from {}", path.display());
    Ok(image::open(path)?.to_rgba8())
}

/// Encode RGBA pixels as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageSourceError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageSourceError::Encode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| ImageSourceError::Encode(e.to_string()))?;
    }
    Ok(png_data)
}

/// Encode RGBA pixels as a `data:image/png;base64,...` URL.
pub fn encode_png_data_url(image: &RgbaImage) -> Result<String, ImageSourceError> {
    let data_url = DataUrl {
        mime: "image/png".to_string(),
        data: encode_png(image)?,
    };
    Ok(data_url.to_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_parse_data_url() {
        let url = DataUrl::parse("data:text/plain;base64,aGk=").unwrap();
        assert_eq!(url.mime, "text/plain");
        assert_eq!(url.data, b"hi");
        assert_eq!(url.to_url(), "data:text/plain;base64,aGk=");
    }

    #[test]
    fn test_parse_rejects_bad_urls() {
        assert!(matches!(DataUrl::parse("http://x/y.png"), Err(ImageSourceError::NotDataUrl)));
        assert!(matches!(DataUrl::parse("data:image/png;base64"), Err(ImageSourceError::NotDataUrl)));
        assert!(matches!(
            DataUrl::parse("data:text/plain,hello"),
            Err(ImageSourceError::UnsupportedEncoding(_))
        ));
        assert!(matches!(
            DataUrl::parse("data:image/png;base64,@@@"),
            Err(ImageSourceError::Base64(_))
        ));
    }

    #[test]
    fn test_png_data_url_decodes_to_same_pixels() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 255, 128]));

        let url = encode_png_data_url(&image).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), image);
    }

    #[test]
    fn test_decode_garbage_image() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(b"not a png"));
        assert!(matches!(decode_data_url(&url), Err(ImageSourceError::Decode(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        let image = RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 255]));
        std::fs::write(&path, encode_png(&image).unwrap()).unwrap();

        assert_eq!(load_file(&path).unwrap(), image);
        assert!(load_file(dir.path().join("missing.png")).is_err());
    }
}
