use id3::{Tag, TagLike};
use id3::frame::{Content, Picture, PictureType};

use super::super::error::CodecError;

/// Embedded cover art: raw image bytes + MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// First embedded picture (APIC/PIC), if any.
pub(crate) fn first_artwork(tag: &Tag) -> Option<Artwork> {
    for f in tag.frames() {
        if f.id() != "APIC" && f.id() != "PIC" {
            continue;
        }
        if let Content::Picture(p) = f.content() {
            return Some(Artwork {
                data: p.data.clone(),
                mime_type: p.mime_type.clone(),
            });
        }
    }

    None
}

/// Replace every picture with a single front cover.
pub(crate) fn set_artwork(tag: &mut Tag, data: Vec<u8>) -> Result<(), CodecError> {
    let mime_type = sniff_image_mime(&data).ok_or(CodecError::UnknownImageFormat)?;

    tag.remove_all_pictures();
    let _ = tag.add_frame(Picture {
        mime_type: mime_type.to_string(),
        picture_type: PictureType::CoverFront,
        description: String::new(),
        data,
    });
    Ok(())
}

/// MIME type from the leading magic bytes.
pub(crate) fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}
