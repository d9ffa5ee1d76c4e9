//! Bundled palette-refit transformation target.
//!
//! Port of the defective routine this probe drives: the working buffer is
//! sized from the target's palette length while the write index comes from
//! the target's pixel values. A pixel value at or beyond the palette length
//! indexes past the end of the buffer; under a bounds-checking runtime that
//! lands as an index abort, which is the probe's intended end state.
//!
//! The sizing scheme (five slots per palette color: channel accumulators
//! plus a population count) is kept as-is. Do not "fix" it here; a corrected
//! refit belongs to the library under test, not to the trigger.

use super::{ColorMatcher, IndexedImage, TrueColorImage};

/// Accumulator slots per palette color: r, g, b, a, population.
const SLOTS: usize = 5;

/// Refit the target's palette to the average of the source pixels mapped to
/// each slot.
pub struct PaletteRefit;

impl ColorMatcher for PaletteRefit {
    fn color_match(&mut self, source: &TrueColorImage, target: &mut IndexedImage) {
        let mut buf = vec![0u64; SLOTS * target.palette_len()];

        for y in 0..target.height() {
            for x in 0..target.width() {
                let color = source.pixel(x, y);
                let at = target.pixel(x, y) as usize * SLOTS;
                let bucket = &mut buf[at..at + SLOTS];
                bucket[0] += u64::from(color >> 16 & 0xff);
                bucket[1] += u64::from(color >> 8 & 0xff);
                bucket[2] += u64::from(color & 0xff);
                bucket[3] += u64::from(color >> 24 & 0xff);
                bucket[4] += 1;
            }
        }

        for (slot, entry) in target.palette_mut().iter_mut().enumerate() {
            let bucket = &buf[slot * SLOTS..(slot + 1) * SLOTS];
            if bucket[4] == 0 {
                continue;
            }
            entry.r = (bucket[0] / bucket[4]) as u8;
            entry.g = (bucket[1] / bucket[4]) as u8;
            entry.b = (bucket[2] / bucket[4]) as u8;
        }
    }
}
