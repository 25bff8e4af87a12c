//! Key mapping writing

use super::KeyMapping;
use crate::error::{Error, Result};
use byteorder::{NativeEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a key mapping file to disk
///
/// # Errors
/// Returns an error if file writing fails or a field does not fit in `i32`.
pub fn write_mapping<P: AsRef<Path>>(path: P, mapping: &KeyMapping) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, mapping)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a key mapping to bytes
///
/// # Errors
/// Returns [`Error::MappingTooLarge`] if a count or key length does not fit in `i32`.
pub fn mapping_to_bytes(mapping: &KeyMapping) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_to(&mut buffer, mapping)?;
    Ok(buffer)
}

fn write_to<W: Write>(writer: &mut W, mapping: &KeyMapping) -> Result<()> {
    writer.write_i32::<NativeEndian>(encode_len(mapping.scalars.len(), "scalar count")?)?;
    for entry in &mapping.scalars {
        writer.write_i32::<NativeEndian>(entry.id)?;
        write_key(writer, &entry.key)?;
        writer.write_i32::<NativeEndian>(i32::from(entry.has_arguments))?;
    }

    writer.write_i32::<NativeEndian>(encode_len(mapping.plurals.len(), "plural count")?)?;
    for entry in &mapping.plurals {
        writer.write_i32::<NativeEndian>(entry.id)?;
        write_key(writer, &entry.key)?;
    }

    Ok(())
}

fn write_key<W: Write>(writer: &mut W, key: &str) -> Result<()> {
    writer.write_i32::<NativeEndian>(encode_len(key.len(), "key length")?)?;
    writer.write_all(key.as_bytes())?;
    Ok(())
}

fn encode_len(len: usize, field: &str) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::MappingTooLarge(format!("{field} {len}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::mapping::parse_mapping_bytes;

    #[test]
    fn test_written_layout() {
        let mut mapping = KeyMapping::new();
        mapping.push_scalar(5, "A", true);
        mapping.push_plural(2, "Bc");

        let bytes = mapping_to_bytes(&mapping).unwrap();
        let mut expected = Vec::new();
        for value in [1i32, 5, 1] {
            expected.extend_from_slice(&value.to_ne_bytes());
        }
        expected.push(b'A');
        for value in [1i32, 1, 2, 2] {
            expected.extend_from_slice(&value.to_ne_bytes());
        }
        expected.extend_from_slice(b"Bc");
        assert_eq!(bytes, expected);

        assert_eq!(parse_mapping_bytes(&bytes).unwrap(), mapping);
    }
}
