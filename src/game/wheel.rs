//! The prize wheel
//!
//! Sixteen fixed segments. A spin picks one segment uniformly; repeated
//! values on the wheel make some amounts likelier than others.

use super::random::RandomSource;

/// What landing on a segment does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEffect {
    /// Dollar value per consonant found
    Cash(u32),
    /// Turn passes, round score kept
    LoseTurn,
    /// Round score wiped, turn passes
    Bankrupt,
}

/// One slice of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelSegment {
    pub label: &'static str,
    pub effect: SegmentEffect,
    /// Display colour as 0xRRGGBB
    pub color: u32,
}

const fn cash(label: &'static str, value: u32, color: u32) -> WheelSegment {
    WheelSegment {
        label,
        effect: SegmentEffect::Cash(value),
        color,
    }
}

/// The wheel, in clockwise order.
pub static SEGMENTS: [WheelSegment; 16] = [
    cash("$500", 500, 0xc0392b),
    cash("$650", 650, 0x7b2fbe),
    cash("$900", 900, 0x117a65),
    cash("$300", 300, 0xe67e22),
    cash("$1200", 1200, 0x1a5276),
    WheelSegment {
        label: "LOSE TURN",
        effect: SegmentEffect::LoseTurn,
        color: 0x555555,
    },
    cash("$750", 750, 0xd4ac0d),
    cash("$400", 400, 0x1e8449),
    WheelSegment {
        label: "BANKRUPT",
        effect: SegmentEffect::Bankrupt,
        color: 0x111111,
    },
    cash("$800", 800, 0x6c3483),
    cash("$500", 500, 0x922b21),
    cash("$1000", 1000, 0xb9770e),
    WheelSegment {
        label: "LOSE TURN",
        effect: SegmentEffect::LoseTurn,
        color: 0x555555,
    },
    cash("$600", 600, 0x0e6655),
    cash("$350", 350, 0x154360),
    cash("$700", 700, 0x784212),
];

/// Spin the wheel.
pub fn spin<R: RandomSource>(rng: &mut R) -> &'static WheelSegment {
    &SEGMENTS[rng.index(SEGMENTS.len())]
}

impl WheelSegment {
    /// Dollar value if this is a cash segment.
    pub fn cash_value(&self) -> Option<u32> {
        match self.effect {
            SegmentEffect::Cash(value) => Some(value),
            _ => None,
        }
    }

    /// Colour split into RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::random::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_segment_mix() {
        let lose = SEGMENTS
            .iter()
            .filter(|s| s.effect == SegmentEffect::LoseTurn)
            .count();
        let bankrupt = SEGMENTS
            .iter()
            .filter(|s| s.effect == SegmentEffect::Bankrupt)
            .count();
        let fives = SEGMENTS
            .iter()
            .filter(|s| s.cash_value() == Some(500))
            .count();

        assert_eq!(lose, 2);
        assert_eq!(bankrupt, 1);
        assert_eq!(fives, 2, "$500 appears twice by design of the wheel");
    }

    #[test]
    fn test_labels_match_values() {
        for segment in &SEGMENTS {
            if let Some(value) = segment.cash_value() {
                assert_eq!(segment.label, format!("${}", value));
            }
        }
    }

    #[test]
    fn test_spin_uses_drawn_index() {
        let mut rng = ScriptedRandom::new().with_indices(&[8, 5, 4]);

        assert_eq!(spin(&mut rng).effect, SegmentEffect::Bankrupt);
        assert_eq!(spin(&mut rng).effect, SegmentEffect::LoseTurn);
        assert_eq!(spin(&mut rng).cash_value(), Some(1200));
    }

    #[test]
    fn test_spin_reaches_every_segment() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut hits = [0usize; 16];

        for _ in 0..4000 {
            let landed = spin(&mut rng);
            let index = SEGMENTS
                .iter()
                .position(|s| std::ptr::eq(s, landed))
                .unwrap();
            hits[index] += 1;
        }

        // Uniform over segments: expect ~250 each
        for (index, count) in hits.iter().enumerate() {
            assert!(*count > 150, "segment {} landed only {} times", index, count);
        }
    }

    #[test]
    fn test_rgb_split() {
        assert_eq!(SEGMENTS[0].rgb(), (0xc0, 0x39, 0x2b));
    }
}
