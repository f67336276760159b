//! Two forward-only cursors over borrowed real and integer buffers.
//!
//! Every read is bounds-checked before the cursor moves: a failed read
//! returns [`DecodeError::OutOfData`] and leaves both positions untouched.
//! Positions never decrease.
use crate::io::errors::{DecodeError, DecodeResult, Stream};

/// Cursor pair over a flat `f64` buffer and a flat `i64` buffer.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    reals: &'a [f64],
    ints: &'a [i64],
    real_pos: usize,
    int_pos: usize,
}

impl<'a> Cursor<'a> {
    /// Start both cursors at position 0.
    pub fn new(reals: &'a [f64], ints: &'a [i64]) -> Self {
        Cursor { reals, ints, real_pos: 0, int_pos: 0 }
    }

    /// Number of reals consumed so far.
    pub fn position(&self) -> usize {
        self.real_pos
    }

    /// Number of integers consumed so far.
    pub fn position_i(&self) -> usize {
        self.int_pos
    }

    /// Reals left to read.
    pub fn available(&self) -> usize {
        self.reals.len() - self.real_pos
    }

    /// Integers left to read.
    pub fn available_i(&self) -> usize {
        self.ints.len() - self.int_pos
    }

    pub fn next_scalar(&mut self) -> DecodeResult<f64> {
        Ok(self.next_scalars(1)?[0])
    }

    pub fn next_integer(&mut self) -> DecodeResult<i64> {
        Ok(self.next_integers(1)?[0])
    }

    /// Contiguous run of `n` reals; `n = 0` always succeeds.
    ///
    /// # Errors
    /// - [`DecodeError::OutOfData`] if `n > available()`.
    pub fn next_scalars(&mut self, n: usize) -> DecodeResult<&'a [f64]> {
        let available = self.available();
        if n > available {
            return Err(DecodeError::OutOfData { stream: Stream::Reals, requested: n, available });
        }
        let start = self.real_pos;
        self.real_pos += n;
        Ok(&self.reals[start..start + n])
    }

    /// Contiguous run of `n` integers; same contract as [`Cursor::next_scalars`].
    pub fn next_integers(&mut self, n: usize) -> DecodeResult<&'a [i64]> {
        let available = self.available_i();
        if n > available {
            return Err(DecodeError::OutOfData {
                stream: Stream::Integers,
                requested: n,
                available,
            });
        }
        let start = self.int_pos;
        self.int_pos += n;
        Ok(&self.ints[start..start + n])
    }

    /// Succeeds only if both buffers are fully consumed.
    ///
    /// # Errors
    /// - [`DecodeError::TrailingData`] with the unread counts otherwise.
    pub fn finish(&self) -> DecodeResult<()> {
        let (reals, ints) = (self.available(), self.available_i());
        if reals != 0 || ints != 0 {
            return Err(DecodeError::TrailingData { reals, ints });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sequential consumption and position bookkeeping for both streams.
    // - Exhaustion errors that leave the cursor untouched.
    // - `finish` reporting unread values.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify scalar and integer reads advance independently.
    //
    // Given
    // -----
    // - reals = [1.5, 2.5, 3.5], ints = [7, 8].
    //
    // Expect
    // ------
    // - Values come back in order; each stream tracks its own position.
    fn reads_advance_each_stream_independently() {
        // Arrange
        let reals = [1.5, 2.5, 3.5];
        let ints = [7, 8];
        let mut cursor = Cursor::new(&reals, &ints);

        // Act / Assert
        assert_eq!(cursor.next_scalar().unwrap(), 1.5);
        assert_eq!(cursor.next_integer().unwrap(), 7);
        assert_eq!(cursor.next_scalars(2).unwrap(), &[2.5, 3.5]);
        assert_eq!((cursor.position(), cursor.position_i()), (3, 1));
        assert_eq!((cursor.available(), cursor.available_i()), (0, 1));
    }

    #[test]
    // Purpose
    // -------
    // Ensure over-long reads fail without moving the cursor.
    //
    // Given
    // -----
    // - Two reals and no integers.
    //
    // Expect
    // ------
    // - `next_scalars(3)` and `next_integer()` return `OutOfData`.
    // - The positions are unchanged and a subsequent valid read succeeds.
    fn exhaustion_does_not_advance() {
        // Arrange
        let reals = [1.0, 2.0];
        let mut cursor = Cursor::new(&reals, &[]);

        // Act
        let err = cursor.next_scalars(3).unwrap_err();
        let err_i = cursor.next_integer().unwrap_err();

        // Assert
        assert_eq!(
            err,
            DecodeError::OutOfData { stream: Stream::Reals, requested: 3, available: 2 }
        );
        assert_eq!(
            err_i,
            DecodeError::OutOfData { stream: Stream::Integers, requested: 1, available: 0 }
        );
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_scalars(2).unwrap(), &[1.0, 2.0]);
        assert!(cursor.next_scalars(0).unwrap().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Check `finish` after partial and full consumption.
    //
    // Given
    // -----
    // - One real and one integer.
    //
    // Expect
    // ------
    // - `TrailingData { reals: 1, ints: 1 }` before reading; `Ok` after.
    fn finish_reports_unread_values() {
        let mut cursor = Cursor::new(&[0.5], &[3]);
        assert_eq!(cursor.finish(), Err(DecodeError::TrailingData { reals: 1, ints: 1 }));
        cursor.next_scalar().unwrap();
        cursor.next_integer().unwrap();
        assert_eq!(cursor.finish(), Ok(()));
    }
}
