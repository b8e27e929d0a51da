/// Which end of a byte the first bit of a field occupies.
///
/// With [`BitOrder::Lsb`] bit 0 of a field is the lowest bit of the first
/// byte it touches. With [`BitOrder::Msb`] it is the highest, so a byte
/// stream reads left to right the way it is usually drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// Least significant bit first.
    #[default]
    Lsb,
    /// Most significant bit first.
    Msb,
}

impl BitOrder {
    /// Shift that moves bit `sub` (0..8, counted in this order) of a byte
    /// down to bit 0.
    #[inline]
    pub const fn bit_in_byte(self, sub: u32) -> u32 {
        match self {
            BitOrder::Lsb => sub,
            BitOrder::Msb => 7 - sub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_in_byte_mirrors_between_orders() {
        for sub in 0..8 {
            assert_eq!(BitOrder::Lsb.bit_in_byte(sub), sub);
            assert_eq!(BitOrder::Msb.bit_in_byte(sub), 7 - sub);
        }
        assert_eq!(BitOrder::default(), BitOrder::Lsb);
    }
}
