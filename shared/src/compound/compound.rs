use std::collections::{btree_map, BTreeMap};

use metatile_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

use super::{
    error::CompoundError,
    tag::{Tag, TagType, MAX_DEPTH},
};

/// A structured, nested record of named tags. This is the persisted form of
/// a holder and of the devices it carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    entries: BTreeMap<String, Tag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True if `key` is present and holds a tag of `tag_type`
    pub fn contains_key_of_type(&self, key: &str, tag_type: TagType) -> bool {
        self.entries
            .get(key)
            .is_some_and(|tag| tag.tag_type() == tag_type)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(key.into(), tag.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Tag> {
        self.entries.iter()
    }

    // Lenient getters: None when absent or of another type

    pub fn get_byte(&self, key: &str) -> Option<i8> {
        match self.entries.get(key) {
            Some(Tag::Byte(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_byte(key).map(|value| value != 0)
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.entries.get(key) {
            Some(Tag::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(Tag::Long(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_double(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(Tag::Double(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Tag::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn get_byte_array(&self, key: &str) -> Option<&[u8]> {
        match self.entries.get(key) {
            Some(Tag::ByteArray(value)) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[Tag]> {
        match self.entries.get(key) {
            Some(Tag::List(value)) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        match self.entries.get(key) {
            Some(Tag::Compound(value)) => Some(value),
            _ => None,
        }
    }

    // Strict getters, for device payloads that require a field

    fn type_error(&self, key: &str, expected: TagType) -> CompoundError {
        match self.entries.get(key) {
            Some(tag) => CompoundError::WrongType {
                key: key.to_string(),
                expected,
                found: tag.tag_type(),
            },
            None => CompoundError::MissingKey {
                key: key.to_string(),
            },
        }
    }

    pub fn try_get_byte(&self, key: &str) -> Result<i8, CompoundError> {
        self.get_byte(key)
            .ok_or_else(|| self.type_error(key, TagType::Byte))
    }

    pub fn try_get_bool(&self, key: &str) -> Result<bool, CompoundError> {
        Ok(self.try_get_byte(key)? != 0)
    }

    pub fn try_get_int(&self, key: &str) -> Result<i32, CompoundError> {
        self.get_int(key)
            .ok_or_else(|| self.type_error(key, TagType::Int))
    }

    pub fn try_get_long(&self, key: &str) -> Result<i64, CompoundError> {
        self.get_long(key)
            .ok_or_else(|| self.type_error(key, TagType::Long))
    }

    pub fn try_get_double(&self, key: &str) -> Result<f64, CompoundError> {
        self.get_double(key)
            .ok_or_else(|| self.type_error(key, TagType::Double))
    }

    pub fn try_get_string(&self, key: &str) -> Result<&str, CompoundError> {
        self.get_string(key)
            .ok_or_else(|| self.type_error(key, TagType::String))
    }

    pub fn try_get_byte_array(&self, key: &str) -> Result<&[u8], CompoundError> {
        self.get_byte_array(key)
            .ok_or_else(|| self.type_error(key, TagType::ByteArray))
    }

    pub fn try_get_list(&self, key: &str) -> Result<&[Tag], CompoundError> {
        self.get_list(key)
            .ok_or_else(|| self.type_error(key, TagType::List))
    }

    pub fn try_get_compound(&self, key: &str) -> Result<&Compound, CompoundError> {
        self.get_compound(key)
            .ok_or_else(|| self.type_error(key, TagType::Compound))
    }

    // Storage

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::with_capacity(self.bit_length().div_ceil(8) as usize);
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
        Self::de(&mut BitReader::new(bytes))
    }

    pub(crate) fn de_nested(reader: &mut BitReader, depth: usize) -> Result<Self, SerdeErr> {
        if depth > MAX_DEPTH {
            return Err(SerdeErr);
        }

        let mut entries = BTreeMap::new();
        while bool::de(reader)? {
            let key = String::de(reader)?;
            let tag = Tag::de_nested(reader, depth + 1)?;
            if entries.insert(key, tag).is_some() {
                // a writer never emits the same key twice
                return Err(SerdeErr);
            }
        }
        Ok(Self { entries })
    }
}

impl Serde for Compound {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for (key, tag) in &self.entries {
            true.ser(writer);
            key.ser(writer);
            tag.ser(writer);
        }
        false.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Self::de_nested(reader, 0)
    }

    fn bit_length(&self) -> u32 {
        let mut output = 1;
        for (key, tag) in &self.entries {
            output += 1 + key.bit_length() + tag.bit_length();
        }
        output
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = btree_map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
