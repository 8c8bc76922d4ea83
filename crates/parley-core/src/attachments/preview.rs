//! Preview generation for staged attachments.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use image::{codecs::jpeg::JpegEncoder, GenericImageView};

use crate::models::FileBlob;
use crate::{Error, Result};

/// Broad attachment category, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Audio,
    Video,
    Text,
    File,
}

impl AttachmentKind {
    #[must_use]
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else if mime_type.starts_with("audio/") {
            Self::Audio
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else if mime_type.starts_with("text/") {
            Self::Text
        } else {
            Self::File
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

/// What the front end shows for a staged attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentPreview {
    Thumbnail {
        data_uri: String,
        width: u32,
        height: u32,
    },
    Icon {
        kind: AttachmentKind,
    },
    Unavailable {
        reason: String,
    },
}

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOptions {
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// JPEG quality.
    pub jpeg_quality: u8,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            max_width: 128,
            max_height: 128,
            jpeg_quality: 80,
        }
    }
}

/// Generated thumbnail payload (always JPEG).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Build the preview for a file. Images are decoded, which may be slow;
/// callers run this off the async executor.
#[must_use]
pub fn build_preview(file: &FileBlob) -> AttachmentPreview {
    let kind = AttachmentKind::from_mime(&file.mime_type);
    if kind != AttachmentKind::Image {
        return AttachmentPreview::Icon { kind };
    }

    match generate_thumbnail(&file.bytes, ThumbnailOptions::default()) {
        Ok(thumbnail) => AttachmentPreview::Thumbnail {
            data_uri: format!(
                "data:image/jpeg;base64,{}",
                BASE64_STANDARD.encode(&thumbnail.bytes)
            ),
            width: thumbnail.width,
            height: thumbnail.height,
        },
        Err(error) => AttachmentPreview::Unavailable {
            reason: error.to_string(),
        },
    }
}

/// Generate a JPEG thumbnail from source bytes.
///
/// The image is resized to fit within `max_width` x `max_height` while preserving
/// aspect ratio. Images smaller than the target bounds are not upscaled.
pub fn generate_thumbnail(
    source_bytes: &[u8],
    options: ThumbnailOptions,
) -> Result<ThumbnailImage> {
    if source_bytes.is_empty() {
        return Err(Error::InvalidInput(
            "Thumbnail source bytes cannot be empty".to_string(),
        ));
    }
    if options.max_width == 0 || options.max_height == 0 {
        return Err(Error::InvalidInput(
            "Thumbnail max dimensions must be greater than zero".to_string(),
        ));
    }

    let source = image::load_from_memory(source_bytes).map_err(|error| {
        Error::InvalidInput(format!("Failed to decode image for preview: {error}"))
    })?;

    let (source_width, source_height) = source.dimensions();
    let resized = if source_width <= options.max_width && source_height <= options.max_height {
        source
    } else {
        source.thumbnail(options.max_width, options.max_height)
    };
    let (width, height) = resized.dimensions();

    // JPEG has no alpha channel.
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut cursor = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut cursor, options.jpeg_quality)
        .encode_image(&rgb)
        .map_err(|error| Error::InvalidInput(format!("Failed to encode preview: {error}")))?;

    Ok(ThumbnailImage {
        bytes: cursor.into_inner(),
        width,
        height,
    })
}
