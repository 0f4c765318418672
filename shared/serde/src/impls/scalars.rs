use crate::{error::SerdeErr, BitReader, BitWrite, ConstBitLength, Serde};

// Unit //

impl Serde for () {
    fn ser(&self, _: &mut dyn BitWrite) {}

    fn de(_: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(())
    }

    fn bit_length(&self) -> u32 {
        0
    }
}

impl ConstBitLength for () {
    fn const_bit_length() -> u32 {
        0
    }
}

// Boolean //

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for bool {
    fn const_bit_length() -> u32 {
        1
    }
}

// Fixed-width numbers, written as little-endian bytes //

macro_rules! impl_serde_for_bytes {
    ($impl_type:ident) => {
        impl Serde for $impl_type {
            fn ser(&self, writer: &mut dyn BitWrite) {
                for byte in self.to_le_bytes() {
                    writer.write_byte(byte);
                }
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                let mut bytes = [0u8; std::mem::size_of::<$impl_type>()];
                for byte in bytes.iter_mut() {
                    *byte = reader.read_byte()?;
                }
                Ok($impl_type::from_le_bytes(bytes))
            }

            fn bit_length(&self) -> u32 {
                <Self as ConstBitLength>::const_bit_length()
            }
        }

        impl ConstBitLength for $impl_type {
            fn const_bit_length() -> u32 {
                (std::mem::size_of::<$impl_type>() as u32) * 8
            }
        }
    };
}

impl_serde_for_bytes!(u8);
impl_serde_for_bytes!(u16);
impl_serde_for_bytes!(u32);
impl_serde_for_bytes!(u64);
impl_serde_for_bytes!(i8);
impl_serde_for_bytes!(i16);
impl_serde_for_bytes!(i32);
impl_serde_for_bytes!(i64);
impl_serde_for_bytes!(f32);
impl_serde_for_bytes!(f64);
