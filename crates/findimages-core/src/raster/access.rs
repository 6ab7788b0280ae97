//! Bit access within a packed row of words
//!
//! Pixel `x` of a row lives in word `x / 32` at bit `31 - (x % 32)`.

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value. Any nonzero `val` sets the bit.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    if val != 0 {
        set_data_bit_val(line, x);
    } else {
        clear_data_bit(line, x);
    }
}

/// Set a 1-bit pixel to 1.
#[inline]
pub fn set_data_bit_val(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] |= 0x8000_0000 >> (x & 31);
}

/// Clear a 1-bit pixel to 0.
#[inline]
pub fn clear_data_bit(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] &= !(0x8000_0000 >> (x & 31));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut line = [0u32; 2];
        set_data_bit_val(&mut line, 0);
        set_data_bit_val(&mut line, 33);
        assert_eq!(line[0], 0x8000_0000);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 0), 1);
        assert_eq!(get_data_bit(&line, 33), 1);
        assert_eq!(get_data_bit(&line, 32), 0);

        clear_data_bit(&mut line, 0);
        assert_eq!(line[0], 0);
        set_data_bit(&mut line, 63, 1);
        assert_eq!(line[1], 0x4000_0001);
    }
}
