//! Shared capability of the address, action and observation spaces.

use rand::Rng;

/// A set of values that can be sampled uniformly and tested for membership.
///
/// Randomness is always supplied by the caller so that no sampling state is
/// shared between spaces or environments.
pub trait Space {
    type Element;

    /// Draw a uniformly random element of the space
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element;

    /// Returns true if `x` is a member of the space
    fn contains(&self, x: &Self::Element) -> bool;
}
