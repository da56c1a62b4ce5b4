/// Content type used when the bytes carry no recognizable signature.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        _ => {
            tracing::debug!(
                "Unrecognized image format (first 4 bytes: {:02X?}), labelling as {}",
                &bytes[..bytes.len().min(4)],
                DEFAULT_IMAGE_MIME
            );
            DEFAULT_IMAGE_MIME
        }
    }
}
