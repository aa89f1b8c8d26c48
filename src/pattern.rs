use crate::device::buttons::{A, B, DPAD_DOWN, DPAD_LEFT, DPAD_RIGHT, DPAD_UP, X, Y};

/// Face buttons in press order.
pub const FACE_SEQUENCE: [u16; 4] = [A, B, X, Y];

/// Clockwise sweep starting at up.
pub const DPAD_SEQUENCE: [u16; 8] = [
    DPAD_UP,                // ↑
    DPAD_UP | DPAD_RIGHT,   // ↗
    DPAD_RIGHT,             // →
    DPAD_RIGHT | DPAD_DOWN, // ↘
    DPAD_DOWN,              // ↓
    DPAD_DOWN | DPAD_LEFT,  // ↙
    DPAD_LEFT,              // ←
    DPAD_LEFT | DPAD_UP,    // ↖
];

/// Walks a pattern table forever, wrapping at its length.
#[derive(Debug, Clone)]
pub struct PatternCursor {
    table: &'static [u16],
    count: u64,
}

impl PatternCursor {
    pub fn new(table: &'static [u16]) -> Self {
        Self { table, count: 0 }
    }

    pub fn face() -> Self {
        Self::new(&FACE_SEQUENCE)
    }

    pub fn dpad() -> Self {
        Self::new(&DPAD_SEQUENCE)
    }

    /// Returns `table[count % len]` and bumps the counter.
    pub fn advance(&mut self) -> u16 {
        let value = self.table[(self.count % self.table.len() as u64) as usize];
        self.count += 1;
        value
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::buttons::DPAD_MASK;

    #[test]
    fn dpad_entries_are_one_or_two_adjacent_cardinals() {
        for (i, dir) in DPAD_SEQUENCE.iter().enumerate() {
            assert_eq!(dir & !DPAD_MASK, 0, "entry {} leaks outside the d-pad", i);
            let expected = if i % 2 == 0 { 1 } else { 2 };
            assert_eq!(dir.count_ones(), expected, "entry {}", i);
        }
        assert_eq!(DPAD_SEQUENCE[1], 0x0009);
    }

    #[test]
    fn face_entries_avoid_the_dpad_nibble() {
        for button in FACE_SEQUENCE {
            assert_eq!(button & DPAD_MASK, 0);
            assert_eq!(button.count_ones(), 1);
        }
    }

    #[test]
    fn cursor_wraps_around() {
        let mut cursor = PatternCursor::face();
        let seen: Vec<u16> = (0..6).map(|_| cursor.advance()).collect();
        assert_eq!(seen, vec![A, B, X, Y, A, B]);
        assert_eq!(cursor.count(), 6);

        let mut cursor = PatternCursor::dpad();
        for _ in 0..9 {
            cursor.advance();
        }
        assert_eq!(cursor.advance(), DPAD_SEQUENCE[1]);
    }
}
