//! Fixed-size overlapping windows over any iterator.
//!
//! Every window holds exactly `size` slots. Full windows advance by one item.
//! When the whole input is shorter than `size` a single window is produced,
//! right-padded with `None`; an empty input produces nothing.

use operon_core::{OperonError, OperonResult};
use std::collections::VecDeque;

/// One window: `size` slots, `None` marking padding
pub type Window<T> = Vec<Option<T>>;

/// Iterator returned by [`sliding_window`]
#[derive(Debug, Clone)]
pub struct SlidingWindow<I: Iterator> {
    source: I,
    size: usize,
    buffer: VecDeque<I::Item>,
    emitted: bool,
    finished: bool,
}

/// Build a sliding window of `size` items over `items`.
///
/// Fails with [`OperonError::InvalidInput`] when `size` is zero.
pub fn sliding_window<I>(items: I, size: usize) -> OperonResult<SlidingWindow<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    if size == 0 {
        return Err(OperonError::InvalidInput(
            "window size must be a positive integer".to_string(),
        ));
    }

    Ok(SlidingWindow {
        source: items.into_iter(),
        size,
        buffer: VecDeque::with_capacity(size),
        emitted: false,
        finished: false,
    })
}

impl<I> SlidingWindow<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn padded_tail(&mut self) -> Option<Window<I::Item>> {
        if self.emitted || self.buffer.is_empty() {
            return None;
        }

        let mut window: Window<I::Item> = self.buffer.drain(..).map(Some).collect();
        window.resize(self.size, None);
        self.emitted = true;
        Some(window)
    }
}

impl<I> Iterator for SlidingWindow<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Window<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for item in self.source.by_ref() {
            self.buffer.push_back(item);
            if self.buffer.len() == self.size {
                let window = self.buffer.iter().cloned().map(Some).collect();
                self.buffer.pop_front();
                self.emitted = true;
                return Some(window);
            }
        }

        self.finished = true;
        self.padded_tail()
    }
}
