use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

// This outer generic type wraps an inner type that is not generic, to reduce code bloat through monomorphization.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    inner: SerdeIntegerInner,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
struct SerdeIntegerInner {
    inner_value: i128,
    signed: bool,
    variable: bool,
    bits: u8,
}

impl SerdeIntegerInner {
    fn try_new(signed: bool, variable: bool, bits: u8, value: i128) -> Option<Self> {
        if bits == 0 || bits > 127 {
            return None;
        }
        if !signed && value < 0 {
            return None;
        }
        if !variable {
            let limit: i128 = 2_i128.pow(bits as u32);
            if value >= limit || value <= -limit {
                return None;
            }
        }

        Some(Self {
            inner_value: value,
            signed,
            variable,
            bits,
        })
    }

    fn ser(&self, writer: &mut dyn BitWrite) {
        let negative = self.inner_value < 0;
        if self.signed {
            writer.write_bit(negative);
        }
        let mut value: u128 = self.inner_value.unsigned_abs();

        if self.variable {
            loop {
                let proceed = value >= 2_u128.pow(self.bits as u32);
                writer.write_bit(proceed);
                for _ in 0..self.bits {
                    writer.write_bit(value & 1 != 0);
                    value >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..self.bits {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader, signed: bool, variable: bool, bits: u8) -> Result<Self, SerdeErr> {
        let negative = if signed { reader.read_bit()? } else { false };

        let mut output: u128 = 0;
        let mut shift: u32 = 0;

        loop {
            let proceed = if variable { reader.read_bit()? } else { false };

            for _ in 0..bits {
                let bit = reader.read_bit()?;
                if bit {
                    // a garbled stream can claim an arbitrarily long number
                    if shift >= 127 {
                        return Err(SerdeErr);
                    }
                    output |= 1 << shift;
                }
                shift += 1;
            }

            if !proceed {
                break;
            }
        }

        let magnitude = i128::try_from(output).map_err(|_| SerdeErr)?;
        let value = if negative { -magnitude } else { magnitude };

        Ok(Self {
            inner_value: value,
            signed,
            variable,
            bits,
        })
    }

    fn bit_length(&self) -> u32 {
        let mut output: u32 = 0;

        if self.signed {
            output += 1;
        }

        if self.variable {
            let mut value = self.inner_value.unsigned_abs();
            loop {
                let proceed = value >= 2_u128.pow(self.bits as u32);
                output += 1 + self.bits as u32;
                value >>= self.bits;
                if !proceed {
                    break;
                }
            }
        } else {
            output += self.bits as u32;
        }
        output
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    /// # Panics
    ///
    /// Panics if `value` can't be represented with this encoding.
    /// Consider using `try_new` for non-panicking construction.
    pub fn new<T: Into<i128>>(value: T) -> Self {
        let value = value.into();
        Self::try_new(value).unwrap_or_else(|| {
            panic!(
                "value `{}` can't be encoded (signed: {}, variable: {}, bits: {})",
                value, SIGNED, VARIABLE, BITS
            )
        })
    }

    pub fn try_new<T: Into<i128>>(value: T) -> Option<Self> {
        let inner = SerdeIntegerInner::try_new(SIGNED, VARIABLE, BITS, value.into())?;
        Some(Self { inner })
    }

    pub fn get(&self) -> i128 {
        self.inner.inner_value
    }

    /// Narrows the decoded value, failing on values a garbled stream pushed
    /// out of the target range.
    pub fn try_to<T: TryFrom<i128>>(&self) -> Result<T, SerdeErr> {
        T::try_from(self.get()).map_err(|_| SerdeErr)
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde for SerdeInteger<SIGNED, VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.inner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let inner = SerdeIntegerInner::de(reader, SIGNED, VARIABLE, BITS)?;
        Ok(Self { inner })
    }

    fn bit_length(&self) -> u32 {
        self.inner.bit_length()
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        let mut output: u32 = 0;
        if SIGNED {
            output += 1;
        }
        output + BITS as u32
    }
}
