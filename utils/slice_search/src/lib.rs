#![no_std]

//! A collection of algorithms for searching sorted sequences by position.
//!
//! The sequences searched here do not have to be slices: a search is driven by a
//! comparator closure which is handed a position and reports how the element at
//! that position compares to the target. This makes it possible to search
//! offset-addressed byte arenas and external segments with the same code that
//! searches a plain slice. Binary and linear search are provided, as well as an
//! optimal search which picks between the two depending on the size of the range.
#![deny(missing_docs)]

use core::cmp::Ordering;
use core::ops::Range;

/// Returns the position of the smallest element greater than or equal to the search
/// key.
///
/// # Example
/// ```
/// use slice_search::*;
///
/// let array = [0, 1, 2, 3, 4, 6];
///
/// let search_result = BinarySearch::search(&array[..], &5);
/// assert_eq!(upper_bound(search_result, 6), Some(5));
///
/// let search_result = BinarySearch::search(&array[..], &10);
/// assert_eq!(upper_bound(search_result, 6), None);
/// ```
pub fn upper_bound(search: Result<usize, usize>, cap: usize) -> Option<usize> {
    match search {
        Ok(index) => Some(index),
        Err(index) if index < cap => Some(index),
        Err(_) => None,
    }
}

/// Returns the position of the largest element less than or equal to the search
/// key.
///
/// # Example
/// ```
/// use slice_search::*;
///
/// let array = [0, 1, 2, 3, 4, 6];
///
/// let search_result = BinarySearch::search(&array[..], &5);
///
/// assert_eq!(lower_bound(search_result), Some(4));
/// ```
#[inline(always)]
pub fn lower_bound(search: Result<usize, usize>) -> Option<usize> {
    match search {
        Ok(index) => Some(index),
        Err(0) => None,
        Err(index) => Some(index - 1),
    }
}

/// An algorithm for searching a sorted sequence, e.g. Binary or Linear
pub trait Search {
    /// Search the positions in `range`, where `cmp(i)` compares the element at
    /// position `i` against the target.
    ///
    /// If the target is found then `Result::Ok` is returned, containing the matching
    /// position. If the target is not found then `Result::Err` is returned, containing
    /// the position where a matching element could be inserted while maintaining
    /// sorted order. Returned positions are absolute, never relative to `range.start`.
    ///
    /// This method assumes that the sequence is sorted over `range`.
    ///
    /// # Example
    ///
    /// ```
    /// use slice_search::*;
    ///
    /// let squares = |i: usize| i * i;
    ///
    /// assert_eq!(BinarySearch::search_range_by(0..10, |i| squares(i).cmp(&49)), Ok(7));
    /// assert_eq!(BinarySearch::search_range_by(2..10, |i| squares(i).cmp(&50)), Err(8));
    /// ```
    fn search_range_by<F>(range: Range<usize>, cmp: F) -> Result<usize, usize>
    where
        F: FnMut(usize) -> Ordering;

    /// Search a slice of `T` by comparing with a given value of `T`
    ///
    /// ```
    /// use slice_search::*;
    ///
    /// let slice = [1, 2, 3, 5, 8];
    /// assert_eq!(BinarySearch::search(&slice, &3), Ok(2));
    /// assert_eq!(BinarySearch::search(&slice, &6), Err(4));
    /// ```
    fn search<T: Ord>(slice: &[T], x: &T) -> Result<usize, usize> {
        Self::search_range_by(0..slice.len(), |i| slice[i].cmp(x))
    }
}

/// Performs a binary search, with computational complexity `O(log n)`
/// However, for small searches, a linear search may be faster.
pub struct BinarySearch;

impl Search for BinarySearch {
    fn search_range_by<F>(range: Range<usize>, mut cmp: F) -> Result<usize, usize>
    where
        F: FnMut(usize) -> Ordering,
    {
        let (mut lo, mut hi) = (range.start, range.end);

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match cmp(mid) {
                Ordering::Equal => return Ok(mid),
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }

        Err(lo)
    }
}

/// Performs a simple linear search, with computational complexity `O(n)`
pub struct LinearSearch;

impl Search for LinearSearch {
    fn search_range_by<F>(range: Range<usize>, mut cmp: F) -> Result<usize, usize>
    where
        F: FnMut(usize) -> Ordering,
    {
        for index in range.clone() {
            match cmp(index) {
                Ordering::Less => continue,
                Ordering::Equal => return Ok(index),
                Ordering::Greater => return Err(index),
            }
        }

        Err(range.end)
    }
}

const BINARY_SEARCH_CUTOFF: usize = 16;

/// Chooses between binary and linear search depending on the length of the range
pub struct OptimalSearch;

impl Search for OptimalSearch {
    fn search_range_by<F>(range: Range<usize>, cmp: F) -> Result<usize, usize>
    where
        F: FnMut(usize) -> Ordering,
    {
        if range.len() > BINARY_SEARCH_CUTOFF {
            BinarySearch::search_range_by(range, cmp)
        } else {
            LinearSearch::search_range_by(range, cmp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: [i32; 11] = [1, 2, 3, 4, 7, 10, 24, 55, 56, 57, 100];

    fn search_with<S: Search>(range: Range<usize>, x: i32) -> Result<usize, usize> {
        S::search_range_by(range, |i| ARRAY[i].cmp(&x))
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(upper_bound(Ok(3), 5), Some(3));
        assert_eq!(upper_bound(Err(3), 5), Some(3));
        assert_eq!(upper_bound(Err(5), 5), None);
        assert_eq!(upper_bound(Err(7), 5), None);
    }

    #[test]
    fn test_lower_bound() {
        assert_eq!(lower_bound(Ok(3)), Some(3));
        assert_eq!(lower_bound(Err(3)), Some(2));
        assert_eq!(lower_bound(Err(0)), None);
    }

    #[test]
    fn binary_linear_search() {
        for i in -10..110 {
            assert_eq!(
                search_with::<BinarySearch>(0..ARRAY.len(), i),
                search_with::<LinearSearch>(0..ARRAY.len(), i)
            );
        }
    }

    #[test]
    fn binary_optimal_search() {
        for i in 0..1_000 {
            assert_eq!(
                search_with::<BinarySearch>(0..ARRAY.len(), i),
                search_with::<OptimalSearch>(0..ARRAY.len(), i)
            );
        }
    }

    #[test]
    fn positions_are_absolute() {
        assert_eq!(search_with::<BinarySearch>(4..8, 24), Ok(6));
        assert_eq!(search_with::<LinearSearch>(4..8, 24), Ok(6));

        // Targets outside the range clamp to its edges
        assert_eq!(search_with::<BinarySearch>(4..8, 0), Err(4));
        assert_eq!(search_with::<LinearSearch>(4..8, 0), Err(4));
        assert_eq!(search_with::<BinarySearch>(4..8, 99), Err(8));
        assert_eq!(search_with::<LinearSearch>(4..8, 99), Err(8));
    }

    #[test]
    fn empty_range() {
        assert_eq!(search_with::<BinarySearch>(3..3, 4), Err(3));
        assert_eq!(search_with::<LinearSearch>(3..3, 4), Err(3));
    }
}
