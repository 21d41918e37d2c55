//! Coin flipping backed by the operating system's secure RNG

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of past flips kept for display
pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => f.write_str("heads"),
            CoinSide::Tails => f.write_str("tails"),
        }
    }
}

#[derive(Debug, Default)]
pub struct CoinFlipper {
    last: Option<CoinSide>,
    history: VecDeque<CoinSide>,
    heads: u64,
    tails: u64,
}

impl CoinFlipper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flip(&mut self) -> CoinSide {
        self.flip_with(&mut OsRng)
    }

    /// Even draws are heads
    pub fn flip_with<R: RngCore>(&mut self, rng: &mut R) -> CoinSide {
        let side = if rng.next_u32() % 2 == 0 {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        };
        self.record(side);
        side
    }

    fn record(&mut self, side: CoinSide) {
        match side {
            CoinSide::Heads => self.heads += 1,
            CoinSide::Tails => self.tails += 1,
        }
        self.last = Some(side);
        self.history.push_front(side);
        self.history.truncate(HISTORY_LEN);
    }

    pub fn last(&self) -> Option<CoinSide> {
        self.last
    }

    /// Most recent flip first
    pub fn history(&self) -> impl Iterator<Item = CoinSide> + '_ {
        self.history.iter().copied()
    }

    pub fn heads(&self) -> u64 {
        self.heads
    }

    pub fn tails(&self) -> u64 {
        self.tails
    }

    pub fn total(&self) -> u64 {
        self.heads + self.tails
    }

    /// Share of heads in percent, `None` before the first flip
    pub fn heads_percentage(&self) -> Option<f64> {
        self.percentage(self.heads)
    }

    pub fn tails_percentage(&self) -> Option<f64> {
        self.percentage(self.tails)
    }

    fn percentage(&self, count: u64) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(count as f64 / total as f64 * 100.0),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_history_is_capped_newest_first() {
        let mut flipper = CoinFlipper::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut results = Vec::new();
        for _ in 0..25 {
            results.push(flipper.flip_with(&mut rng));
        }

        let history: Vec<_> = flipper.history().collect();
        assert_eq!(history.len(), HISTORY_LEN);
        let expected: Vec<_> = results.iter().rev().take(HISTORY_LEN).copied().collect();
        assert_eq!(history, expected);
        assert_eq!(flipper.last(), results.last().copied());
    }

    #[test]
    fn test_counts_add_up() {
        let mut flipper = CoinFlipper::new();
        for _ in 0..200 {
            flipper.flip();
        }
        assert_eq!(flipper.total(), 200);
        let sum = flipper.heads_percentage().unwrap() + flipper.tails_percentage().unwrap();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_empty_until_first_flip() {
        let flipper = CoinFlipper::new();
        assert_eq!(flipper.heads_percentage(), None);
        assert_eq!(flipper.tails_percentage(), None);
    }

    #[test]
    fn test_reset() {
        let mut flipper = CoinFlipper::new();
        flipper.flip();
        flipper.reset();
        assert_eq!(flipper.total(), 0);
        assert_eq!(flipper.last(), None);
        assert_eq!(flipper.history().count(), 0);
    }

    #[test]
    fn test_parity_decides_side() {
        struct Fixed(u32);
        impl RngCore for Fixed {
            fn next_u32(&mut self) -> u32 {
                self.0
            }
            fn next_u64(&mut self) -> u64 {
                self.0 as u64
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }

        let mut flipper = CoinFlipper::new();
        assert_eq!(flipper.flip_with(&mut Fixed(4)), CoinSide::Heads);
        assert_eq!(flipper.flip_with(&mut Fixed(7)), CoinSide::Tails);
        assert_eq!(flipper.heads(), 1);
        assert_eq!(flipper.tails(), 1);
    }
}
