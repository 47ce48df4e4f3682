//! Packed one-bit-per-node color storage.

use bitvec::prelude::*;

/// Number of color slots held by one byte of the table.
pub const SLOTS_PER_BYTE: usize = 8;

/// Most slots a single insertion may add to the table (2 MiB of colors).
/// Keys are meant to stay dense; a key far past the last one is rejected
/// instead of reserving the whole gap.
pub const MAX_GROWTH_SLOTS: usize = 1 << 24;

/// Red-black node color. `Red` is stored as 0 and `Black` as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    fn from_bit(bit: bool) -> Self {
        if bit { Color::Black } else { Color::Red }
    }

    fn as_bit(self) -> bool {
        matches!(self, Color::Black)
    }

    /// Whether the color is `Red`.
    pub fn is_red(self) -> bool {
        self == Color::Red
    }
}

/// Growable bit table mapping a node's slot to its color.
///
/// A node's slot is `key / half_scaling`; its byte is `slot / 8` and its bit
/// `slot % 8`. Slots never written read as `Red`.
#[derive(Debug, Clone)]
pub struct ColorTable {
    bits: BitVec<u8, Lsb0>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTable {
    /// Table with room for one byte of colors.
    pub fn new() -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; SLOTS_PER_BYTE],
        }
    }

    /// Slot of the node with the given key.
    pub fn slot_for(key: u64, half_scaling: u64) -> Option<usize> {
        usize::try_from(key / half_scaling).ok()
    }

    /// Number of slots currently addressable.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Number of bytes backing the table.
    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Whether making `slot` addressable stays within [`MAX_GROWTH_SLOTS`].
    pub fn can_grow_to(&self, slot: usize) -> bool {
        slot.saturating_sub(self.capacity()) < MAX_GROWTH_SLOTS
    }

    /// Grows the table by whole bytes until `slot` is addressable. Returns
    /// `true` if the table grew.
    pub fn ensure(&mut self, slot: usize) -> bool {
        if slot < self.bits.len() {
            return false;
        }
        let bytes = slot / SLOTS_PER_BYTE + 1;
        self.bits.resize(bytes * SLOTS_PER_BYTE, Color::Red.as_bit());
        true
    }

    /// Color stored at `slot`, `None` past the capacity.
    pub fn get(&self, slot: usize) -> Option<Color> {
        self.bits.get(slot).map(|bit| Color::from_bit(*bit))
    }

    /// Stores `color` at `slot`, growing the table if needed.
    pub fn set(&mut self, slot: usize, color: Color) {
        self.ensure(slot);
        self.bits.set(slot, color.as_bit());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_holds_one_byte_of_red() {
        let table = ColorTable::new();
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.byte_len(), 1);
        assert!((0..8).all(|slot| table.get(slot) == Some(Color::Red)));
        assert_eq!(table.get(8), None);
    }

    #[test]
    fn slot_is_key_over_half_scaling() {
        assert_eq!(ColorTable::slot_for(0, 50), Some(0));
        assert_eq!(ColorTable::slot_for(150, 50), Some(3));
        assert_eq!(ColorTable::slot_for(399, 50), Some(7));
        assert_eq!(ColorTable::slot_for(400, 50), Some(8));
    }

    #[test]
    fn growth_preserves_existing_colors() {
        let mut table = ColorTable::new();
        table.set(0, Color::Black);
        table.set(5, Color::Black);
        table.set(7, Color::Red);

        assert!(table.ensure(8));
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.byte_len(), 2);
        assert!(!table.ensure(15));

        assert_eq!(table.get(0), Some(Color::Black));
        assert_eq!(table.get(5), Some(Color::Black));
        assert_eq!(table.get(7), Some(Color::Red));
        assert_eq!(table.get(8), Some(Color::Red));
    }

    #[test]
    fn growth_is_bounded_per_step() {
        let mut table = ColorTable::new();
        assert!(table.can_grow_to(0));
        assert!(table.can_grow_to(8 + MAX_GROWTH_SLOTS - 1));
        assert!(!table.can_grow_to(8 + MAX_GROWTH_SLOTS));
        assert!(!table.can_grow_to(usize::MAX));

        table.ensure(1000);
        assert!(table.can_grow_to(1008 + MAX_GROWTH_SLOTS - 1));
    }

    #[test]
    fn set_past_capacity_grows_by_whole_bytes() {
        let mut table = ColorTable::new();
        table.set(3, Color::Black);
        table.set(20, Color::Black);
        assert_eq!(table.capacity(), 24);
        assert_eq!(table.byte_len(), 3);
        assert_eq!(table.get(3), Some(Color::Black));
        assert_eq!(table.get(20), Some(Color::Black));
        assert_eq!(table.get(19), Some(Color::Red));
        // bit 3 of byte 0 and bit 4 of byte 2
        assert_eq!(table.bits.as_raw_slice(), &[0b0000_1000u8, 0, 0b0001_0000]);
    }
}
