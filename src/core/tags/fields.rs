//! Editable text fields, keyed by `FieldKey` rather than raw frame ids.

use id3::frame::{Comment, Lyrics};
use id3::{Tag, TagLike, Timestamp, Version};

use super::super::error::CodecError;
use super::util::parse_slash_pair_u32;

/// The fields a caller (editor UI, peer plugin) can read or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Composer,
    Genre,
    Year,
    Track,
    Disc,
    Comment,
    Lyrics,
}

impl FieldKey {
    /// Frame id backing this field in a tag encoded as `version`.
    ///
    /// Only the year differs: `TYER` up to 2.3, `TDRC` in 2.4.
    pub fn frame_id(self, version: Version) -> &'static str {
        match self {
            FieldKey::Title => "TIT2",
            FieldKey::Artist => "TPE1",
            FieldKey::Album => "TALB",
            FieldKey::AlbumArtist => "TPE2",
            FieldKey::Composer => "TCOM",
            FieldKey::Genre => "TCON",
            FieldKey::Year if version == Version::Id3v24 => "TDRC",
            FieldKey::Year => "TYER",
            FieldKey::Track => "TRCK",
            FieldKey::Disc => "TPOS",
            FieldKey::Comment => "COMM",
            FieldKey::Lyrics => "USLT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Artist => "artist",
            FieldKey::Album => "album",
            FieldKey::AlbumArtist => "album artist",
            FieldKey::Composer => "composer",
            FieldKey::Genre => "genre",
            FieldKey::Year => "year",
            FieldKey::Track => "track",
            FieldKey::Disc => "disc",
            FieldKey::Comment => "comment",
            FieldKey::Lyrics => "lyrics",
        }
    }
}

fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    tag.get(id)
        .and_then(|f| f.content().text())
        .map(str::to_owned)
}

/// First value of `key`, as text. The year is read from either frame.
pub(crate) fn first(tag: &Tag, key: FieldKey) -> Option<String> {
    match key {
        FieldKey::Year => tag
            .date_recorded()
            .map(|ts| ts.year)
            .or_else(|| tag.year())
            .map(|y| y.to_string()),
        FieldKey::Comment => tag.comments().next().map(|c| c.text.clone()),
        FieldKey::Lyrics => tag.lyrics().next().map(|l| l.text.clone()),
        // every other frame id is the same in 2.3 and 2.4
        other => text_frame(tag, other.frame_id(Version::Id3v24)),
    }
}

/// Set `key` to `value` in a tag that will be encoded as `version`.
/// Empty/whitespace removes the frame.
pub(crate) fn set(
    tag: &mut Tag,
    version: Version,
    key: FieldKey,
    value: &str,
) -> Result<(), CodecError> {
    let v = value.trim();
    if v.is_empty() {
        remove(tag, key);
        return Ok(());
    }

    match key {
        FieldKey::Year => {
            let year = v.parse::<i32>().map_err(|_| invalid(key, v))?;
            set_year(tag, version, year);
        }
        FieldKey::Track | FieldKey::Disc => {
            let (n, total) = parse_slash_pair_u32(Some(v));
            let n = n.ok_or_else(|| invalid(key, v))?;
            set_slash_pair(tag, key.frame_id(version), n, total);
        }
        FieldKey::Comment => {
            // Replace with a single "eng" comment
            let _ = tag.remove("COMM");
            let _ = tag.add_frame(Comment {
                lang: "eng".to_string(),
                description: "".to_string(),
                text: v.to_string(),
            });
        }
        FieldKey::Lyrics => {
            let _ = tag.remove("USLT");
            let _ = tag.add_frame(Lyrics {
                lang: "eng".to_string(),
                description: "".to_string(),
                text: v.to_string(),
            });
        }
        other => tag.set_text(other.frame_id(version), v.to_string()),
    }
    Ok(())
}

pub(crate) fn remove(tag: &mut Tag, key: FieldKey) {
    match key {
        FieldKey::Year => {
            tag.remove_year();
            tag.remove_date_recorded();
        }
        other => {
            let _ = tag.remove(other.frame_id(Version::Id3v24)); // discard Vec<Frame>
        }
    }
}

/// One year frame only, the one `version` knows about.
fn set_year(tag: &mut Tag, version: Version, year: i32) {
    if version == Version::Id3v24 {
        tag.remove_year();
        tag.set_date_recorded(Timestamp {
            year,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
        });
    } else {
        tag.remove_date_recorded();
        tag.set_year(year);
    }
}

/// Move a 2.3 `TYER` year into `TDRC`, keeping any full recording date.
pub(crate) fn migrate_year_to_v24(tag: &mut Tag) {
    if let Some(year) = tag.year() {
        if tag.date_recorded().is_none() {
            set_year(tag, Version::Id3v24, year);
        } else {
            tag.remove_year();
        }
    }
}

/// Write TRCK/TPOS as "n" or "n/total"
fn set_slash_pair(tag: &mut Tag, id: &str, n: u32, total: Option<u32>) {
    match total {
        Some(t) => tag.set_text(id, format!("{}/{}", n, t)),
        None => tag.set_text(id, n.to_string()),
    }
}

fn invalid(key: FieldKey, value: &str) -> CodecError {
    CodecError::InvalidValue {
        field: key.label(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_round_trip_through_the_tag() {
        let mut tag = Tag::new();
        set(&mut tag, Version::Id3v24, FieldKey::Title, "  Paranoid Android ").unwrap();
        set(&mut tag, Version::Id3v24, FieldKey::AlbumArtist, "Radiohead").unwrap();

        assert_eq!(first(&tag, FieldKey::Title).as_deref(), Some("Paranoid Android"));
        assert_eq!(first(&tag, FieldKey::AlbumArtist).as_deref(), Some("Radiohead"));
        assert_eq!(first(&tag, FieldKey::Artist), None);
    }

    #[test]
    fn empty_value_removes_the_frame() {
        let mut tag = Tag::new();
        set(&mut tag, Version::Id3v24, FieldKey::Genre, "Rock").unwrap();
        set(&mut tag, Version::Id3v24, FieldKey::Genre, "   ").unwrap();
        assert_eq!(first(&tag, FieldKey::Genre), None);
    }

    #[test]
    fn track_keeps_total() {
        let mut tag = Tag::new();
        set(&mut tag, Version::Id3v24, FieldKey::Track, "3/12").unwrap();
        assert_eq!(first(&tag, FieldKey::Track).as_deref(), Some("3/12"));
    }

    #[test]
    fn comment_is_replaced_not_appended() {
        let mut tag = Tag::new();
        set(&mut tag, Version::Id3v24, FieldKey::Comment, "first").unwrap();
        set(&mut tag, Version::Id3v24, FieldKey::Comment, "second").unwrap();
        assert_eq!(tag.comments().count(), 1);
        assert_eq!(first(&tag, FieldKey::Comment).as_deref(), Some("second"));
    }

    #[test]
    fn year_frame_follows_the_tag_version() {
        let mut v24 = Tag::new();
        set(&mut v24, Version::Id3v24, FieldKey::Year, "1994").unwrap();
        assert!(v24.get("TDRC").is_some());
        assert!(v24.get("TYER").is_none());
        assert_eq!(first(&v24, FieldKey::Year).as_deref(), Some("1994"));

        let mut v23 = Tag::new();
        set(&mut v23, Version::Id3v23, FieldKey::Year, "1994").unwrap();
        assert!(v23.get("TYER").is_some());
        assert!(v23.get("TDRC").is_none());
        assert_eq!(first(&v23, FieldKey::Year).as_deref(), Some("1994"));
    }

    #[test]
    fn year_migrates_to_tdrc() {
        let mut tag = Tag::new();
        set(&mut tag, Version::Id3v23, FieldKey::Year, "1997").unwrap();
        migrate_year_to_v24(&mut tag);
        assert!(tag.get("TYER").is_none());
        assert_eq!(tag.date_recorded().map(|ts| ts.year), Some(1997));
    }

    #[test]
    fn removing_the_year_drops_both_frames() {
        let mut tag = Tag::new();
        tag.set_year(1994);
        set(&mut tag, Version::Id3v24, FieldKey::Year, "1995").unwrap();
        tag.set_year(1994);
        remove(&mut tag, FieldKey::Year);
        assert_eq!(first(&tag, FieldKey::Year), None);
    }

    #[test]
    fn bad_year_is_rejected() {
        let mut tag = Tag::new();
        let err = set(&mut tag, Version::Id3v24, FieldKey::Year, "nineteen").unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { field: "year", .. }));
    }
}
