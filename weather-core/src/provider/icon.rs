use async_trait::async_trait;
use image::{RgbaImage, imageops::FilterType};
use reqwest::Client;

use crate::{
    error::{FetchError, Fetched},
    provider::send_checked,
};

use super::IconSource;

/// A decoded condition icon, already scaled for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    image: RgbaImage,
}

impl Icon {
    /// Fully transparent square, shown when the real icon is unavailable.
    pub fn blank(size: u32) -> Self {
        Self { image: RgbaImage::new(size, size) }
    }

    /// Decode `bytes` and scale to fit a `size`×`size` square, keeping the aspect ratio.
    pub fn decode(bytes: &[u8], size: u32) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let scaled = decoded.resize(size, size, FilterType::Lanczos3);
        Ok(Self { image: scaled.to_rgba8() })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA of the pixel at (`x`, `y`), if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }
}

/// Downloads icons over HTTP.
#[derive(Debug, Clone)]
pub struct HttpIconSource {
    http: Client,
    size: u32,
}

impl HttpIconSource {
    pub fn new(http: Client, size: u32) -> Self {
        Self { http, size }
    }

    async fn download(&self, url: &str) -> Result<Icon, FetchError> {
        let res = send_checked(self.http.get(url), url).await?;
        let bytes = res
            .bytes()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        Icon::decode(&bytes, self.size)
            .map_err(|e| FetchError::Decode { url: url.to_string(), reason: e.to_string() })
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn load(&self, url: &str) -> Fetched<Icon> {
        let size = self.size;
        Fetched::from_result(self.download(url).await, || Icon::blank(size))
    }
}
