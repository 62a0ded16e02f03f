//! Degree type and consolidation bounds.
//!
//! # Why u8?
//!
//! The degree of a node is its number of children. In a Fibonacci heap a
//! node of degree `d` roots a subtree of at least `F(d+2) ≥ φ^d` nodes, so
//! degree is bounded by `log_φ(n)`:
//!
//! - 2³² elements → max degree 46
//! - 2⁶⁴ elements → max degree 92
//!
//! `u8` holds any degree a heap that fits in memory can reach, and keeps the
//! node struct smaller than a `usize` field would.
//!
//! # Runtime Checks
//!
//! [`checked_increment`] panics if the theoretical limit is exceeded, which
//! would indicate a bug in linking.

/// Type alias for node degree (number of direct children).
pub type Degree = u8;

/// `1 / ln(φ)` where φ is the golden ratio.
const ONE_OVER_LN_PHI: f64 = 2.078_086_921_235_027_5;

/// Safely increment a degree value, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == Degree::MAX`, which would require more than φ²⁵⁵
/// elements.
///
/// # Example
///
/// ```rust
/// use fibonacci_frontier::degree::{checked_increment, Degree};
///
/// let degree: Degree = 5;
/// assert_eq!(checked_increment(degree), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree.checked_add(1).expect(
        "degree overflow: max degree is log_φ(n) and u8::MAX (255) \
         covers more elements than fit in memory",
    )
}

/// Decrement a degree value, returning 0 if already at minimum.
///
/// A node only loses a child it has, so callers never pass 0 outside of a
/// bug; debug builds assert it.
///
/// ```rust
/// use fibonacci_frontier::degree::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(1), 0);
/// ```
#[inline]
pub fn saturating_decrement(degree: Degree) -> Degree {
    debug_assert!(degree > 0, "decrementing the degree of a leaf");
    degree.saturating_sub(1)
}

/// Number of degree slots consolidation needs for a heap of `len` elements.
///
/// This is `floor(log_φ(len)) + 1`: one slot per possible root degree
/// `0..=D(len)`. Empty and single-element heaps get one slot.
///
/// ```rust
/// use fibonacci_frontier::degree::slot_bound;
///
/// assert_eq!(slot_bound(1), 1);
/// assert_eq!(slot_bound(2), 2);
/// assert_eq!(slot_bound(1000), 15);
/// ```
#[inline]
pub fn slot_bound(len: usize) -> usize {
    if len <= 1 {
        return 1;
    }
    ((len as f64).ln() * ONE_OVER_LN_PHI).floor() as usize + 1
}
