use crate::bitrow::*;
use rand::Rng;

/// A square bit matrix held in a fixed-capacity, reusable buffer.
///
/// The buffer is allocated once for a maximum dimension and then refilled for every
/// matrix it is asked to hold, so a long sweep of rank experiments performs no
/// allocation after startup. For an active dimension `n` (at most the capacity),
/// only rows `0..n` and columns `0..n` are meaningful: the fill operations overwrite
/// exactly that region, and the rank test never reads outside it.
///
/// Each row owns its [`BitBlock`] storage, so [`swap_rows`](BitMatrix::swap_rows)
/// exchanges two heap buffers in constant time instead of copying bits.
#[derive(Clone, Debug)]
pub struct BitMatrix {
    max_dimension: usize,
    rows: Vec<BitRow>,
}

impl BitMatrix {
    /// Allocates a buffer able to hold any square matrix up to `max_dimension`.
    pub fn with_capacity(max_dimension: usize) -> Self {
        let row_blocks = min_blocks(max_dimension);
        BitMatrix {
            max_dimension,
            rows: (0..max_dimension).map(|_| BitRow::zeros(row_blocks)).collect(),
        }
    }

    /// The largest dimension this buffer can hold
    #[inline]
    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    #[inline]
    pub fn bit(&self, i: usize, j: usize) -> bool {
        debug_assert!(j < self.max_dimension);
        self.rows[i].bit(j)
    }

    #[inline]
    pub fn set_bit(&mut self, i: usize, j: usize, b: bool) {
        debug_assert!(j < self.max_dimension);
        self.rows[i].set_bit(j, b);
    }

    /// Exchanges rows `i` and `j` by swapping their block buffers; no bits are copied.
    #[inline]
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    #[inline]
    pub fn row(&self, i: usize) -> &BitRow {
        &self.rows[i]
    }

    /// Overwrites the leading `n`-by-`n` region with independent uniform random bits,
    /// drawn one [`BitBlock`] at a time.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the buffer's capacity.
    pub fn fill_random(&mut self, rng: &mut impl Rng, n: usize) {
        assert!(
            n <= self.max_dimension,
            "dimension {} exceeds buffer capacity {}",
            n,
            self.max_dimension
        );
        for row in &mut self.rows[..n] {
            row.fill_random(rng, n);
        }
    }

    /// Overwrites the leading `n`-by-`n` region with the bits produced by `f`,
    /// called once per (row, column) pair.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the buffer's capacity.
    pub fn fill_with(&mut self, n: usize, mut f: impl FnMut(usize, usize) -> bool) {
        assert!(
            n <= self.max_dimension,
            "dimension {} exceeds buffer capacity {}",
            n,
            self.max_dimension
        );
        let blocks = min_blocks(n);
        for i in 0..n {
            let row = &mut self.rows[i];
            row[0..blocks].clear();
            for j in 0..n {
                if f(i, j) {
                    row.set_bit(j, true);
                }
            }
        }
    }

    /// Decides whether the leading `n`-by-`n` matrix has full rank, by in-place
    /// forward elimination with partial pivoting.
    ///
    /// For each column the topmost remaining row with a 1 in that column becomes the
    /// pivot; it is swapped into place and XORed into every lower row that still has
    /// a 1 in the column. Row updates operate on whole blocks, so each one costs
    /// `min_blocks(n)` word operations rather than `n` bit operations. The search
    /// stops at the first column with no pivot.
    ///
    /// The matrix contents are destroyed; callers refill the buffer before reuse.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the buffer's capacity.
    pub fn is_full_rank(&mut self, n: usize) -> bool {
        assert!(
            n <= self.max_dimension,
            "dimension {} exceeds buffer capacity {}",
            n,
            self.max_dimension
        );
        let blocks = min_blocks(n);
        for i in 0..n {
            let Some(pivot) = (i..n).find(|&r| self.rows[r].bit(i)) else {
                return false;
            };
            self.rows.swap(i, pivot);

            let (head, tail) = self.rows.split_at_mut(i + 1);
            let pivot_row = &head[i];
            for row in &mut tail[..n - i - 1] {
                if row.bit(i) {
                    row[0..blocks] ^= &pivot_row[0..blocks];
                }
            }
        }
        true
    }

    /// Computes the rank of the leading `n`-by-`n` matrix.
    ///
    /// Same elimination as [`is_full_rank`](BitMatrix::is_full_rank), but rank-deficient
    /// columns are skipped instead of ending the search, so the full pivot count comes
    /// back. The matrix contents are destroyed.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the buffer's capacity.
    pub fn rank(&mut self, n: usize) -> usize {
        assert!(
            n <= self.max_dimension,
            "dimension {} exceeds buffer capacity {}",
            n,
            self.max_dimension
        );
        let blocks = min_blocks(n);
        let mut rank = 0;
        for pcol in 0..n {
            let Some(pivot) = (rank..n).find(|&r| self.rows[r].bit(pcol)) else {
                continue;
            };
            self.rows.swap(rank, pivot);

            let (head, tail) = self.rows.split_at_mut(rank + 1);
            let pivot_row = &head[rank];
            for row in &mut tail[..n - rank - 1] {
                if row.bit(pcol) {
                    row[0..blocks] ^= &pivot_row[0..blocks];
                }
            }
            rank += 1;
        }
        rank
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn from_rows(rows: &[&[u8]]) -> BitMatrix {
        let n = rows.len();
        let mut m = BitMatrix::with_capacity(n);
        m.fill_with(n, |i, j| rows[i][j] != 0);
        m
    }

    #[test]
    fn one_by_one() {
        assert!(from_rows(&[&[1]]).is_full_rank(1));
        assert!(!from_rows(&[&[0]]).is_full_rank(1));
    }

    #[test]
    fn two_by_two() {
        assert!(from_rows(&[&[1, 0], &[0, 1]]).is_full_rank(2));
        assert!(!from_rows(&[&[1, 1], &[1, 1]]).is_full_rank(2));
        assert!(from_rows(&[&[0, 1], &[1, 0]]).is_full_rank(2));
        assert!(from_rows(&[&[1, 1], &[0, 1]]).is_full_rank(2));
    }

    #[test]
    fn empty_matrix_is_full_rank() {
        let mut m = BitMatrix::with_capacity(0);
        assert!(m.is_full_rank(0));
        assert_eq!(m.rank(0), 0);
    }

    #[test]
    fn identity_is_full_rank() {
        // sizes around the block boundary
        for n in [1, 2, 63, 64, 65, 100] {
            let mut m = BitMatrix::with_capacity(n);
            m.fill_with(n, |i, j| i == j);
            assert!(m.is_full_rank(n), "identity of size {}", n);
        }
    }

    #[test]
    fn zero_matrix_is_not() {
        for n in [1, 5, 64, 80] {
            let mut m = BitMatrix::with_capacity(n);
            m.fill_with(n, |_, _| false);
            assert!(!m.is_full_rank(n));
        }
    }

    #[test]
    fn duplicated_row_is_not() {
        let mut rng = SmallRng::seed_from_u64(1);
        for n in [2, 7, 65] {
            let mut m = BitMatrix::with_capacity(n);
            m.fill_random(&mut rng, n);
            // copy row 0 over the last row
            for j in 0..n {
                let b = m.bit(0, j);
                m.set_bit(n - 1, j, b);
            }
            assert!(!m.is_full_rank(n));
        }
    }

    #[test]
    fn rank_test_is_deterministic() {
        let mut rng = SmallRng::seed_from_u64(2);
        for n in [3, 16, 70] {
            let mut m = BitMatrix::with_capacity(n);
            for _ in 0..10 {
                m.fill_random(&mut rng, n);
                let mut copy = m.clone();
                assert_eq!(m.is_full_rank(n), copy.is_full_rank(n));
            }
        }
    }

    #[test]
    fn full_rank_agrees_with_rank() {
        let mut rng = SmallRng::seed_from_u64(3);
        let n = 40;
        let mut m = BitMatrix::with_capacity(n);
        for _ in 0..20 {
            m.fill_random(&mut rng, n);
            let mut copy = m.clone();
            assert_eq!(m.is_full_rank(n), copy.rank(n) == n);
        }
    }

    #[test]
    fn rank_of_known_matrices() {
        let mut m = from_rows(&[
            &[1, 1, 0, 0],
            &[1, 0, 1, 0],
            &[1, 0, 0, 1],
            &[0, 0, 0, 0],
        ]);
        assert_eq!(m.rank(4), 3);

        let mut m = from_rows(&[&[1, 1, 0], &[1, 1, 0], &[1, 1, 0]]);
        assert_eq!(m.rank(3), 1);

        // every row of the all-ones matrix is the same
        let mut m = BitMatrix::with_capacity(6);
        m.fill_with(6, |_, _| true);
        assert_eq!(m.rank(6), 1);
    }

    #[test]
    fn swap_rows_exchanges_contents() {
        let mut m = from_rows(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]);
        m.swap_rows(0, 2);
        assert!(m.bit(0, 2) && m.bit(2, 0));
        assert!(!m.bit(0, 0) && !m.bit(2, 2));
        assert!(m.bit(1, 1));
    }

    #[test]
    fn buffer_reuse_across_dimensions() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut m = BitMatrix::with_capacity(80);

        // leave stale bits from a large fill, then run a small identity through it
        m.fill_random(&mut rng, 80);
        m.fill_with(5, |i, j| i == j);
        assert!(m.is_full_rank(5));

        m.fill_random(&mut rng, 80);
        m.fill_random(&mut rng, 3);
        let mut copy = m.clone();
        assert_eq!(m.is_full_rank(3), copy.is_full_rank(3));
    }

    #[test]
    #[should_panic(expected = "exceeds buffer capacity")]
    fn oversized_dimension_panics() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut m = BitMatrix::with_capacity(8);
        m.fill_random(&mut rng, 9);
    }
}
