//! 128-bit identifiers and where they come from.
//!
//! Identifiers in form text are single-use: the host never asks for the
//! same value twice, so every NameMap entry, `GUID` block, and checksum is
//! drawn fresh from an [`IdSource`].

use std::fmt;

/// A 128-bit identifier, rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(pub u128);

impl Identifier {
    /// Number of hex digits in the rendered form.
    pub const HEX_LEN: usize = 32;
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Supplies identifiers.
pub trait IdSource {
    /// Returns the next identifier.
    fn next_id(&mut self) -> Identifier;

    /// Returns a signed checksum placeholder in `-2_000_000_000..=2_000_000_000`.
    fn next_checksum(&mut self) -> i64 {
        const SPAN: u128 = 4_000_000_001;
        (self.next_id().0 % SPAN) as i64 - 2_000_000_000
    }
}

/// Uniformly random identifiers from the calling thread's generator.
///
/// Each thread owns its generator state, so concurrent callers never share
/// a sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> Identifier {
        Identifier(rand::random::<u128>())
    }
}

/// Counts upward from a starting value. Reproducible output for tests and
/// previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Starts counting at `first`.
    #[must_use]
    pub fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Identifier {
        let id = Identifier(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_32_lowercase_hex_digits() {
        assert_eq!(
            Identifier(0xABC).to_string(),
            "00000000000000000000000000000abc"
        );
        assert_eq!(Identifier(u128::MAX).to_string().len(), Identifier::HEX_LEN);
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::starting_at(7);
        assert_eq!(ids.next_id(), Identifier(7));
        assert_eq!(ids.next_id(), Identifier(8));
    }

    #[test]
    fn checksum_stays_in_range() {
        let mut ids = SequentialIds::starting_at(0);
        assert_eq!(ids.next_checksum(), -2_000_000_000);
        let mut ids = SequentialIds::starting_at(4_000_000_000);
        assert_eq!(ids.next_checksum(), 2_000_000_000);
        let mut random = RandomIds;
        for _ in 0..64 {
            let checksum = random.next_checksum();
            assert!((-2_000_000_000..=2_000_000_000).contains(&checksum));
        }
    }

    #[test]
    fn random_ids_differ() {
        let mut ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
