use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, constants::MAX_CONTAINER_LENGTH,
    error::SerdeErr, serde::Serde, UnsignedVariableInteger,
};

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = UnsignedVariableInteger::<5>::new(self.len() as u64);
        length.ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length: usize = UnsignedVariableInteger::<5>::de(reader)?.try_to()?;
        // every element costs at least one bit, except zero-sized ones
        if length > MAX_CONTAINER_LENGTH {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(length.min(reader.remaining_bits()));
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }

    fn bit_length(&self) -> u32 {
        let length = UnsignedVariableInteger::<5>::new(self.len() as u64);
        let mut output = length.bit_length();
        for item in self {
            output += item.bit_length();
        }
        output
    }
}
