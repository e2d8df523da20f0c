//! Fixed-Size Moving-Average Filter
//!
//! ## Overview
//!
//! Smooths the calibrated voltage with a boxcar average over the last `N`
//! samples. Storage is a plain array sized at compile time through a const
//! generic, so the filter lives in a static or on the stack with no
//! allocation.
//!
//! ## Incremental Sum
//!
//! The filter keeps a running sum next to the ring buffer. Each push
//! subtracts the value about to be overwritten, writes the new value and
//! adds it back:
//!
//! ```text
//! MovingAverage<4> after pushes 1, 2, 3, 4, 5:
//! ┌─────┬─────┬─────┬─────┐
//! │  5  │  2  │  3  │  4  │   running_sum = 14
//! └─────┴─────┴─────┴─────┘
//!          ↑
//!          └── write_index = 1 (next slot to overwrite)
//! ```
//!
//! `push()` is O(1) regardless of `N`; `mean()` is a single division.
//!
//! ## Warm-Up
//!
//! The buffer starts zero-filled, so the mean is biased low until every slot
//! has been written once. `is_warmed_up()` flips to true the first time the
//! write index wraps back to 0, i.e. on the `N`th push, and stays true.
//! [`MovingAverage::filtered`] folds that check in and returns `None` while
//! stabilizing.
//!
//! ## Usage Example
//!
//! ```rust
//! use hvmon_core::filter::MovingAverage;
//!
//! let mut filter: MovingAverage<8> = MovingAverage::new();
//!
//! for _ in 0..8 {
//!     filter.push(500.0);
//! }
//! assert_eq!(filter.filtered(), Some(500.0));
//!
//! // Ninth value displaces the oldest 500
//! filter.push(600.0);
//! assert_eq!(filter.mean(), 512.5);
//! ```

/// Boxcar filter over the last `N` samples
///
/// ## Internal Invariants
///
/// - `write_index < N`
/// - `running_sum == buffer.iter().sum()` up to float rounding
/// - `warmed_up` never returns to false
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    /// Most recent `N` samples, oldest at `write_index` once warmed up
    buffer: [f32; N],

    /// Slot the next push overwrites
    write_index: usize,

    /// Sum of all slots
    running_sum: f32,

    /// Set on the first wrap of `write_index`
    warmed_up: bool,
}

impl<const N: usize> MovingAverage<N> {
    const NON_EMPTY: () = assert!(N > 0, "MovingAverage window must hold at least one sample");

    /// Creates a zero-filled filter
    ///
    /// This is a const function, allowing creation in static contexts.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Self {
            buffer: [0.0; N],
            write_index: 0,
            running_sum: 0.0,
            warmed_up: false,
        }
    }

    /// Adds a sample, displacing the oldest one
    pub fn push(&mut self, value: f32) {
        self.running_sum -= self.buffer[self.write_index];
        self.buffer[self.write_index] = value;
        self.running_sum += value;

        self.write_index = (self.write_index + 1) % N;
        if self.write_index == 0 {
            self.warmed_up = true;
        }
    }

    /// Mean of the window
    ///
    /// Before warm-up the unwritten slots count as zero, so the value is not
    /// representative. Prefer [`filtered`](Self::filtered) for display.
    pub fn mean(&self) -> f32 {
        self.running_sum / N as f32
    }

    /// Mean of the window once every slot holds a real sample
    pub fn filtered(&self) -> Option<f32> {
        if self.warmed_up {
            Some(self.mean())
        } else {
            None
        }
    }

    /// True once `N` samples have been pushed
    pub fn is_warmed_up(&self) -> bool {
        self.warmed_up
    }

    /// Window length
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Running sum of the window
    pub fn sum(&self) -> f32 {
        self.running_sum
    }

    /// Number of real samples in the window
    pub fn len(&self) -> usize {
        if self.warmed_up {
            N
        } else {
            self.write_index
        }
    }

    /// True before the first push
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
