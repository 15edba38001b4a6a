//! Non-repeating shuffled sampling over an indexed collection.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Draws indices `0..len` in shuffled rounds.
///
/// Every index is returned exactly once per round; a new round starts with
/// a fresh shuffle. The cycler holds indices only, so it works for catalogs
/// and for the key table alike.
#[derive(Debug, Clone)]
pub struct Cycler {
    len: usize,
    order: Vec<usize>,
    cursor: usize,
}

impl Cycler {
    /// A cycler over `0..len`. The first draw shuffles.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            order: Vec::new(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Next index of the current round, reshuffling when the round is spent.
    ///
    /// Returns `None` only when the collection is empty.
    pub fn next_index<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let index = self.peek_index(rng)?;
        self.cursor += 1;
        Some(index)
    }

    /// The index the next [`next_index`](Self::next_index) call returns,
    /// without consuming it. A spent round is reshuffled here, so peeking
    /// and then drawing uses the RNG exactly as a plain draw does.
    pub fn peek_index<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.cursor >= self.order.len() {
            self.order = (0..self.len).collect();
            self.order.shuffle(rng);
            self.cursor = 0;
            debug!(len = self.len, "cycler reshuffled");
        }
        Some(self.order[self.cursor])
    }

    /// Drops the current round so the next draw starts a fresh shuffle.
    pub fn reset_permutation(&mut self) {
        self.order.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_round_covers_all() {
        let mut rng = create_rng(7);
        let mut cycler = Cycler::new(6);

        for _ in 0..5 {
            let mut round: Vec<usize> = (0..6)
                .map(|_| cycler.next_index(&mut rng).unwrap())
                .collect();
            round.sort_unstable();
            assert_eq!(round, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_empty_yields_none() {
        let mut rng = create_rng(1);
        let mut cycler = Cycler::new(0);
        assert!(cycler.is_empty());
        assert_eq!(cycler.next_index(&mut rng), None);
    }

    #[test]
    fn test_reset_starts_new_round() {
        let mut rng = create_rng(3);
        let mut cycler = Cycler::new(4);
        cycler.next_index(&mut rng);
        cycler.next_index(&mut rng);
        cycler.reset_permutation();

        let mut round: Vec<usize> = (0..4)
            .map(|_| cycler.next_index(&mut rng).unwrap())
            .collect();
        round.sort_unstable();
        assert_eq!(round, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut peeked = Cycler::new(6);
        let mut plain = Cycler::new(6);
        let mut rng_a = create_rng(13);
        let mut rng_b = create_rng(13);

        for _ in 0..14 {
            let next = peeked.peek_index(&mut rng_a);
            assert_eq!(peeked.peek_index(&mut rng_a), next);
            assert_eq!(peeked.next_index(&mut rng_a), next);
            assert_eq!(plain.next_index(&mut rng_b), next);
        }
    }

    #[test]
    fn test_single_item() {
        let mut rng = create_rng(9);
        let mut cycler = Cycler::new(1);
        for _ in 0..3 {
            assert_eq!(cycler.next_index(&mut rng), Some(0));
        }
    }
}
