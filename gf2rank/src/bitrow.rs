use rand::Rng;
use ref_cast::RefCast;
use std::fmt;
use std::ops::{BitXorAssign, Deref, DerefMut, Index, IndexMut, Range};

/// A block of bits. This is an alias for [`u64`]
pub type BitBlock = u64;

/// Number of bits in a [`BitBlock`]
pub const BLOCKSIZE: usize = 64;

/// Bitwise AND with this constant to set most signficant bit to zero
pub const MSB_OFF: BitBlock = 0x7fffffffffffffff;

/// Bitwise OR with this constant to set most signficant bit to one
pub const MSB_ON: BitBlock = 0x8000000000000000;

/// Returns the minimum number of [`BitBlock`]s required to store the given number of bits.
///
/// If `bits` is not a multiple of [`BLOCKSIZE`], the result is rounded up so all bits fit.
#[inline]
pub fn min_blocks(bits: usize) -> usize {
    bits / BLOCKSIZE + if bits % BLOCKSIZE == 0 { 0 } else { 1 }
}

/// Returns a mask keeping the first `bits % BLOCKSIZE` bits of a block, or every bit
/// when `bits` is a multiple of [`BLOCKSIZE`].
///
/// Bits are stored most-significant first, so "first" means the high end of the block.
#[inline]
pub(crate) fn partial_block_mask(bits: usize) -> BitBlock {
    BitBlock::MAX.wrapping_shl((BLOCKSIZE - (bits % BLOCKSIZE)) as u32)
}

/// One row of a bit matrix, stored as a heap-allocated vector of [`BitBlock`]s.
///
/// A `BitRow` owns its blocks, so two rows can be exchanged by swapping the vectors
/// themselves rather than copying bits. Bit-level access and bitwise operations are
/// provided by [`RowBits`], which a `BitRow` dereferences to.
///
/// # Examples
///
/// ```
/// use gf2rank::bitrow::BitRow;
///
/// // A row spanning 128 bits, all zero
/// let mut row = BitRow::zeros(2);
/// row.set_bit(100, true);
/// assert!(row.bit(100));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitRow(Vec<BitBlock>);

/// A range of bits within a row, represented as a slice of [`BitBlock`]s.
#[derive(RefCast, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct RowBits([BitBlock]);

impl RowBits {
    /// Returns the value of the bit at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        let block_index = index / BLOCKSIZE;
        let bit_index = (index % BLOCKSIZE) as u32;
        let block = self.0[block_index].rotate_left(bit_index);
        block & MSB_ON == MSB_ON
    }

    /// Sets the bit at the given index to the provided value.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let block_index = index / BLOCKSIZE;
        let bit_index = (index % BLOCKSIZE) as u32;
        let mut block = self.0[block_index].rotate_left(bit_index);
        if value {
            block |= MSB_ON;
        } else {
            block &= MSB_OFF;
        }
        self.0[block_index] = block.rotate_right(bit_index);
    }

    /// Counts the number of bits set to 1 in the entire range.
    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.iter().fold(0, |c, bits| c + bits.count_ones())
    }

    /// Sets every block in the range to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    /// The number of [`BitBlock`]s in this range
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of bits in this range
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.0.len() * BLOCKSIZE
    }
}

impl Index<Range<usize>> for RowBits {
    type Output = RowBits;

    #[inline]
    fn index(&self, index: Range<usize>) -> &Self::Output {
        RowBits::ref_cast(&self.0[index])
    }
}

impl IndexMut<Range<usize>> for RowBits {
    #[inline]
    fn index_mut(&mut self, index: Range<usize>) -> &mut Self::Output {
        RowBits::ref_cast_mut(&mut self.0[index])
    }
}

impl BitXorAssign<&Self> for RowBits {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &RowBits) {
        for (bits0, bits1) in self.0.iter_mut().zip(rhs.0.iter()) {
            *bits0 ^= bits1;
        }
    }
}

impl BitRow {
    /// Creates a row of `num_blocks` blocks, all bits zero
    #[inline]
    pub fn zeros(num_blocks: usize) -> Self {
        BitRow(vec![0; num_blocks])
    }

    /// Creates a row of `num_blocks` uniformly random blocks
    #[inline]
    pub fn random(rng: &mut impl Rng, num_blocks: usize) -> Self {
        (0..num_blocks).map(|_| rng.random::<BitBlock>()).collect()
    }

    /// Overwrites the first `cols` bits of this row with independent uniform random
    /// bits, one whole [`BitBlock`] at a time.
    ///
    /// Bits at index `cols` and above within the touched blocks are set to zero;
    /// blocks past `min_blocks(cols)` are left as they were.
    ///
    /// # Panics
    ///
    /// Panics if the row holds fewer than `min_blocks(cols)` blocks.
    pub fn fill_random(&mut self, rng: &mut impl Rng, cols: usize) {
        let blocks = min_blocks(cols);
        let mask = partial_block_mask(cols);
        for k in 0..blocks {
            let bits = rng.random::<BitBlock>();
            self.0[k] = if k == blocks - 1 { bits & mask } else { bits };
        }
    }
}

impl fmt::Display for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bits in self.0.iter() {
            write!(f, "{:064b}", bits)?;
        }
        Ok(())
    }
}

impl From<Vec<BitBlock>> for BitRow {
    fn from(value: Vec<BitBlock>) -> Self {
        BitRow(value)
    }
}

impl FromIterator<BitBlock> for BitRow {
    fn from_iter<T: IntoIterator<Item = BitBlock>>(iter: T) -> Self {
        Vec::from_iter(iter).into()
    }
}

impl Deref for BitRow {
    type Target = RowBits;
    fn deref(&self) -> &Self::Target {
        RowBits::ref_cast(&self.0)
    }
}

impl DerefMut for BitRow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        RowBits::ref_cast_mut(&mut self.0)
    }
}
