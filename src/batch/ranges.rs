use std::iter::FusedIterator;
use std::ops::Range;

/// Half-open index ranges covering `[0, count)` in steps of `size`
#[derive(Debug, Clone)]
pub struct BatchRanges {
    offset: usize,
    count: usize,
    size: usize,
}

impl BatchRanges {
    /// `size` must be non-zero; `Batcher` guarantees it
    pub(crate) fn new(count: usize, size: usize) -> Self {
        Self {
            offset: 0,
            count,
            size,
        }
    }
}

impl Iterator for BatchRanges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset < self.count {
            let end = self.offset.saturating_add(self.size).min(self.count);
            let range = self.offset..end;
            self.offset = end;
            Some(range)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.offset).div_ceil(self.size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchRanges {}

impl FusedIterator for BatchRanges {}
