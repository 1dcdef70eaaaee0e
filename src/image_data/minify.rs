//! # 缩小与重编码模块
//!
//! ## 设计思路
//!
//! `minify` 把编码负载解码出自然宽高，按“宽优先、再看高”的规则计算
//! 不超过 `max_width × max_height` 的目标尺寸（保持纵横比），重渲染后
//! 按给定质量重编码为同一（或显式指定的）媒体类型。
//!
//! ## 实现思路
//!
//! 1. 空负载直接拒绝（`EmptyPayload`，异步失败而非静默吞掉）
//! 2. 解码取得自然尺寸
//! 3. 按边界计算目标尺寸；未超界则尺寸不变
//! 4. 优先 `fast_image_resize` 重渲染，失败回退 `image::resize_exact`
//! 5. 重编码：有损格式应用 `quality`，无损格式忽略；
//!    无编码器的类型（如 SVG）回落为 PNG 并如实标注

use fast_image_resize as fr;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

use super::{ImageData, ImageDataError};

/// 重渲染使用的滤镜：质量与耗时的平衡档。
const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// 缩小选项。
///
/// 缺省值与宿主侧约定保持一致：800×800、质量 0.8、媒体类型沿用原图。
#[derive(Debug, Clone)]
pub struct MinifyOptions {
    /// 目标宽度上限（像素）。
    pub max_width: u32,
    /// 目标高度上限（像素）。
    pub max_height: u32,
    /// 重编码质量（0.0..=1.0，仅对有损编码生效）。
    pub quality: f32,
    /// 显式指定输出媒体类型；`None` 沿用原图类型。
    pub media_type: Option<String>,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 800,
            quality: 0.8,
            media_type: None,
        }
    }
}

impl ImageData {
    /// 生成一个尺寸受限的新图片表示，原实例保持不变。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use image_drop_paste::{ImageData, MinifyOptions};
    ///
    /// let minified = image.minify(MinifyOptions::default()).await?;
    /// # Ok::<(), image_drop_paste::ImageDataError>(())
    /// ```
    pub async fn minify(&self, options: MinifyOptions) -> Result<ImageData, ImageDataError> {
        if self.is_empty() {
            return Err(ImageDataError::EmptyPayload(
                "无法缩小图片，编码负载不应为空".to_string(),
            ));
        }

        let bytes = self.decoded_bytes()?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| ImageDataError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        let (target_width, target_height) =
            bounded_dimensions(width, height, options.max_width, options.max_height);

        let rendered = if (target_width, target_height) == (width, height) {
            decoded
        } else {
            log::debug!(
                "🧩 缩小图片：{}x{} -> {}x{}",
                width,
                height,
                target_width,
                target_height
            );
            rescale(&decoded, target_width, target_height)
        };

        let requested_type = options
            .media_type
            .as_deref()
            .unwrap_or_else(|| self.media_type());
        let (encoded, media_type) = encode_with_quality(&rendered, requested_type, options.quality)?;

        Ok(ImageData::from_bytes(&encoded, Some(media_type)))
    }
}

/// 计算不超过边界的目标尺寸，保持纵横比。
///
/// 宽不小于高且宽超界：按 `max_width / width` 缩放；
/// 否则高超界时按 `max_height / height` 缩放；都未超界则尺寸不变。
fn bounded_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width >= height && width > max_width {
        let scale = max_width as f64 / width as f64;
        (max_width, scaled(height, scale))
    } else if height > max_height {
        let scale = max_height as f64 / height as f64;
        (scaled(width, scale), max_height)
    } else {
        (width, height)
    }
}

fn scaled(dimension: u32, scale: f64) -> u32 {
    ((dimension as f64 * scale).round() as u32).max(1)
}

/// 重渲染到目标尺寸。
///
/// `fast_image_resize` 失败时回退到 `image::resize_exact`，
/// 保证缩放本身不会让整条流水线失败。
fn rescale(image: &DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
    match resize_with_fast_image_resize(image, target_width, target_height) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
            image.resize_exact(target_width, target_height, RESIZE_FILTER)
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<DynamicImage, ImageDataError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image =
        fr::images::Image::from_vec_u8(src_width, src_height, src.into_raw(), fr::PixelType::U8x4)
            .map_err(|e| ImageDataError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(RESIZE_FILTER)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ImageDataError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        target_width,
        target_height,
        dst_image.into_vec(),
    )
    .ok_or_else(|| ImageDataError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

    Ok(DynamicImage::ImageRgba8(rgba))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

/// 按请求的媒体类型重编码。
///
/// 返回实际编码字节与实际媒体类型标签；无编码器的类型回落为 PNG。
fn encode_with_quality(
    image: &DynamicImage,
    media_type: &str,
    quality: f32,
) -> Result<(Vec<u8>, &'static str), ImageDataError> {
    let (format, label) = match media_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => (ImageFormat::Jpeg, "image/jpeg"),
        "image/png" | "image/apng" => (ImageFormat::Png, "image/png"),
        "image/gif" => (ImageFormat::Gif, "image/gif"),
        "image/webp" => (ImageFormat::WebP, "image/webp"),
        "image/bmp" => (ImageFormat::Bmp, "image/bmp"),
        other => {
            log::debug!("媒体类型 {} 无可用编码器，回落到 image/png", other);
            (ImageFormat::Png, "image/png")
        }
    };

    let mut cursor = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            // JPEG 不支持带透明通道的像素布局，先压到 RGB。
            JpegEncoder::new_with_quality(&mut cursor, jpeg_quality(quality))
                .encode_image(&image.to_rgb8())
                .map_err(|e| ImageDataError::Encode(format!("JPEG 编码失败：{}", e)))?;
        }
        _ => {
            image
                .write_to(&mut cursor, format)
                .map_err(|e| ImageDataError::Encode(format!("图片编码失败：{}", e)))?;
        }
    }

    Ok((cursor.into_inner(), label))
}

/// 0.0..=1.0 的质量映射到编码器的 1..=100 档位。
fn jpeg_quality(quality: f32) -> u8 {
    ((quality.clamp(0.0, 1.0) * 100.0).round() as u8).max(1)
}
