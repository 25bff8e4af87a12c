//! Key mapping reading and parsing

use super::{KeyMapping, PluralKey, ScalarKey};
use crate::error::{Error, MappingSection, Result};
use byteorder::{NativeEndian, ReadBytesExt};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Smallest possible record: id + key length, empty key
const MIN_RECORD_SIZE: usize = 8;

/// Read a key mapping file from disk
///
/// # Errors
///
/// Returns [`Error::MappingNotFound`] if the file does not exist, [`Error::Io`]
/// if it cannot be read, and any error of [`parse_mapping_bytes`].
pub fn read_mapping<P: AsRef<Path>>(path: P) -> Result<KeyMapping> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::MappingNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    let mapping = parse_mapping_bytes(&buffer)?;
    tracing::debug!(
        "Loaded key mapping {}: {} scalar, {} plural",
        path.display(),
        mapping.scalars.len(),
        mapping.plurals.len()
    );
    Ok(mapping)
}

/// Parse key mapping data from bytes
///
/// # Errors
///
/// Returns [`Error::MappingTruncated`] if the buffer ends inside a record,
/// [`Error::MappingNegativeLength`] for a negative count or key length, and
/// [`Error::MappingInvalidKey`] for a key that is not UTF-8.
pub fn parse_mapping_bytes(data: &[u8]) -> Result<KeyMapping> {
    let mut reader = MappingReader::new(data);

    let scalar_count = reader.read_len("scalar count")?;
    let mut scalars = Vec::with_capacity(reader.capacity_hint(scalar_count));
    for index in 0..scalar_count {
        reader.index = index;
        let id = reader.read_i32()?;
        let key = reader.read_key()?;
        let has_arguments = reader.read_i32()? != 0;
        scalars.push(ScalarKey {
            id,
            key,
            has_arguments,
        });
    }

    reader.section = MappingSection::Plural;
    reader.index = 0;
    let plural_count = reader.read_len("plural count")?;
    let mut plurals = Vec::with_capacity(reader.capacity_hint(plural_count));
    for index in 0..plural_count {
        reader.index = index;
        let id = reader.read_i32()?;
        let key = reader.read_key()?;
        plurals.push(PluralKey { id, key });
    }

    let trailing = reader.remaining();
    if trailing > 0 {
        tracing::debug!("Ignoring {} trailing bytes after key mapping", trailing);
    }

    Ok(KeyMapping { scalars, plurals })
}

/// Cursor that tags every failure with the record being read
struct MappingReader<'a> {
    cursor: Cursor<&'a [u8]>,
    section: MappingSection,
    index: usize,
}

impl<'a> MappingReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            section: MappingSection::Scalar,
            index: 0,
        }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len.saturating_sub(self.cursor.position() as usize)
    }

    fn truncated(&self, offset: u64) -> Error {
        Error::MappingTruncated {
            section: self.section,
            index: self.index,
            offset,
        }
    }

    /// Bound preallocation by what the buffer could actually hold
    fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.remaining() / MIN_RECORD_SIZE)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let offset = self.cursor.position();
        self.cursor
            .read_i32::<NativeEndian>()
            .map_err(|_| self.truncated(offset))
    }

    fn read_len(&mut self, field: &'static str) -> Result<usize> {
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| Error::MappingNegativeLength {
            section: self.section,
            field,
            value,
        })
    }

    fn read_key(&mut self) -> Result<String> {
        let len = self.read_len("key length")?;
        let offset = self.cursor.position();
        if len > self.remaining() {
            return Err(self.truncated(offset));
        }

        let start = offset as usize;
        let bytes = &self.cursor.get_ref()[start..start + len];
        let key = std::str::from_utf8(bytes)
            .map_err(|_| Error::MappingInvalidKey {
                section: self.section,
                index: self.index,
            })?
            .to_string();
        self.cursor.set_position(offset + len as u64);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_i32(buf: &mut Vec<u8>, value: i32) {
        buf.extend_from_slice(&value.to_ne_bytes());
    }

    fn push_key(buf: &mut Vec<u8>, key: &str) {
        push_i32(buf, key.len() as i32);
        buf.extend_from_slice(key.as_bytes());
    }

    fn sample_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        push_i32(&mut buf, 2);
        push_i32(&mut buf, 0);
        push_key(&mut buf, "Common.Cancel");
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 7);
        push_key(&mut buf, "Chat.Title");
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 3);
        push_key(&mut buf, "Days");
        buf
    }

    #[test]
    fn test_parse_sample() {
        let mapping = parse_mapping_bytes(&sample_bytes()).unwrap();
        assert_eq!(mapping.scalars.len(), 2);
        assert_eq!(mapping.scalars[0].key, "Common.Cancel");
        assert!(!mapping.scalars[0].has_arguments);
        assert_eq!(mapping.scalars[1].id, 7);
        assert!(mapping.scalars[1].has_arguments);
        assert_eq!(mapping.plurals, vec![PluralKey { id: 3, key: "Days".to_string() }]);
    }

    #[test]
    fn test_truncated_key() {
        let bytes = sample_bytes();
        // Cut inside "Chat.Title"
        let err = parse_mapping_bytes(&bytes[..40]).unwrap_err();
        assert!(matches!(
            err,
            Error::MappingTruncated {
                section: MappingSection::Scalar,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_plural_section() {
        let bytes = sample_bytes();
        let err = parse_mapping_bytes(&bytes[..bytes.len() - 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::MappingTruncated {
                section: MappingSection::Plural,
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_buffer() {
        assert!(matches!(
            parse_mapping_bytes(&[]),
            Err(Error::MappingTruncated { offset: 0, .. })
        ));
    }

    #[test]
    fn test_negative_count() {
        let mut buf = Vec::new();
        push_i32(&mut buf, -1);
        assert!(matches!(
            parse_mapping_bytes(&buf),
            Err(Error::MappingNegativeLength { value: -1, .. })
        ));
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        let mut buf = Vec::new();
        push_i32(&mut buf, i32::MAX);
        assert!(matches!(
            parse_mapping_bytes(&buf),
            Err(Error::MappingTruncated { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_key() {
        let mut buf = Vec::new();
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 2);
        buf.extend_from_slice(&[0xff, 0xfe]);
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 0);
        assert!(matches!(
            parse_mapping_bytes(&buf),
            Err(Error::MappingInvalidKey { index: 0, .. })
        ));
    }
}
