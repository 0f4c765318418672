use metatile_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedInteger};

use super::compound::Compound;

/// Deepest nesting of lists and compounds accepted when decoding
pub const MAX_DEPTH: usize = 512;

/// A single typed value inside a persistent Compound
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Byte(i8),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    ByteArray(Vec<u8>),
    List(Vec<Tag>),
    Compound(Compound),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagType {
    Byte,
    Int,
    Long,
    Double,
    String,
    ByteArray,
    List,
    Compound,
}

impl TagType {
    fn to_index(self) -> u8 {
        match self {
            TagType::Byte => 0,
            TagType::Int => 1,
            TagType::Long => 2,
            TagType::Double => 3,
            TagType::String => 4,
            TagType::ByteArray => 5,
            TagType::List => 6,
            TagType::Compound => 7,
        }
    }

    fn from_index(index: u8) -> Result<Self, SerdeErr> {
        match index {
            0 => Ok(TagType::Byte),
            1 => Ok(TagType::Int),
            2 => Ok(TagType::Long),
            3 => Ok(TagType::Double),
            4 => Ok(TagType::String),
            5 => Ok(TagType::ByteArray),
            6 => Ok(TagType::List),
            7 => Ok(TagType::Compound),
            _ => Err(SerdeErr),
        }
    }
}

impl Serde for TagType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedInteger::<3>::new(self.to_index()).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let index: u8 = UnsignedInteger::<3>::de(reader)?.try_to()?;
        Self::from_index(index)
    }

    fn bit_length(&self) -> u32 {
        3
    }
}

impl Tag {
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::Byte(_) => TagType::Byte,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Double(_) => TagType::Double,
            Tag::String(_) => TagType::String,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
        }
    }

    fn ser_value(&self, writer: &mut dyn BitWrite) {
        match self {
            Tag::Byte(value) => value.ser(writer),
            Tag::Int(value) => value.ser(writer),
            Tag::Long(value) => value.ser(writer),
            Tag::Double(value) => value.ser(writer),
            Tag::String(value) => value.ser(writer),
            Tag::ByteArray(value) => value.ser(writer),
            Tag::List(items) => {
                for item in items {
                    true.ser(writer);
                    item.ser(writer);
                }
                false.ser(writer);
            }
            Tag::Compound(compound) => compound.ser(writer),
        }
    }

    pub(crate) fn de_nested(reader: &mut BitReader, depth: usize) -> Result<Self, SerdeErr> {
        if depth > MAX_DEPTH {
            return Err(SerdeErr);
        }

        let tag = match TagType::de(reader)? {
            TagType::Byte => Tag::Byte(i8::de(reader)?),
            TagType::Int => Tag::Int(i32::de(reader)?),
            TagType::Long => Tag::Long(i64::de(reader)?),
            TagType::Double => Tag::Double(f64::de(reader)?),
            TagType::String => Tag::String(String::de(reader)?),
            TagType::ByteArray => Tag::ByteArray(Vec::<u8>::de(reader)?),
            TagType::List => {
                let mut items = Vec::new();
                while bool::de(reader)? {
                    items.push(Tag::de_nested(reader, depth + 1)?);
                }
                Tag::List(items)
            }
            TagType::Compound => Tag::Compound(Compound::de_nested(reader, depth + 1)?),
        };
        Ok(tag)
    }
}

impl Serde for Tag {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.tag_type().ser(writer);
        self.ser_value(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Self::de_nested(reader, 0)
    }

    fn bit_length(&self) -> u32 {
        let value_bits = match self {
            Tag::Byte(value) => value.bit_length(),
            Tag::Int(value) => value.bit_length(),
            Tag::Long(value) => value.bit_length(),
            Tag::Double(value) => value.bit_length(),
            Tag::String(value) => value.bit_length(),
            Tag::ByteArray(value) => value.bit_length(),
            Tag::List(items) => items.iter().map(|item| 1 + item.bit_length()).sum::<u32>() + 1,
            Tag::Compound(compound) => compound.bit_length(),
        };
        self.tag_type().bit_length() + value_bits
    }
}

impl From<i8> for Tag {
    fn from(value: i8) -> Self {
        Tag::Byte(value)
    }
}

impl From<bool> for Tag {
    fn from(value: bool) -> Self {
        Tag::Byte(i8::from(value))
    }
}

impl From<i32> for Tag {
    fn from(value: i32) -> Self {
        Tag::Int(value)
    }
}

impl From<i64> for Tag {
    fn from(value: i64) -> Self {
        Tag::Long(value)
    }
}

impl From<f64> for Tag {
    fn from(value: f64) -> Self {
        Tag::Double(value)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::String(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::String(value.to_string())
    }
}

impl From<Vec<u8>> for Tag {
    fn from(value: Vec<u8>) -> Self {
        Tag::ByteArray(value)
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(value: Vec<Tag>) -> Self {
        Tag::List(value)
    }
}

impl From<Compound> for Tag {
    fn from(value: Compound) -> Self {
        Tag::Compound(value)
    }
}
