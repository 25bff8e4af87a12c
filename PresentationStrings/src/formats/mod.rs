//! On-disk formats: the binary key mapping and per-language dictionaries

pub mod mapping;
pub mod strings;

pub use mapping::{KeyMapping, PluralKey, ScalarKey, read_mapping, write_mapping};
pub use strings::{StringsDictionary, read_strings, write_strings};
