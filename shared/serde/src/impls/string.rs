use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, constants::MAX_CONTAINER_LENGTH,
    error::SerdeErr, serde::Serde, UnsignedVariableInteger,
};

// Strings are a byte length followed by their utf-8 bytes

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = UnsignedVariableInteger::<9>::new(self.len() as u64);
        length.ser(writer);
        for byte in self.as_bytes() {
            writer.write_byte(*byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length: usize = UnsignedVariableInteger::<9>::de(reader)?.try_to()?;
        if length > MAX_CONTAINER_LENGTH || length * 8 > reader.remaining_bits() {
            return Err(SerdeErr);
        }
        let mut bytes = Vec::with_capacity(length);
        for _ in 0..length {
            bytes.push(reader.read_byte()?);
        }
        String::from_utf8(bytes).map_err(|_| SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        let length = UnsignedVariableInteger::<9>::new(self.len() as u64);
        length.bit_length() + (self.len() as u32) * 8
    }
}
