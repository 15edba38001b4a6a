//! Long/short form scheduling for the scheduled archetypes.
//!
//! A [`ModeScheduler`] deals tags from a shuffled queue of six `Long` and
//! three `Short`. The head tag is only consumed after a successful phrase,
//! so a failed attempt sees the same tag again. Each tag also owns a
//! [`Cycler`] over the catalog that supplies its opening cell.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use riffweave_catalog::CellRole;
use serde::Serialize;
use tracing::debug;

use crate::cycler::Cycler;

/// Which structural variant a scheduled archetype builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormTag {
    /// Opens with one 9-note long cell.
    Long,
    /// Opens with two chained 5-note cells.
    Short,
}

impl FormTag {
    pub fn name(self) -> &'static str {
        match self {
            FormTag::Long => "long",
            FormTag::Short => "short",
        }
    }
}

/// Number of `Long` tags per queue.
pub const LONG_PER_QUEUE: usize = 6;
/// Number of `Short` tags per queue.
pub const SHORT_PER_QUEUE: usize = 3;

/// Biased long/short sampler with per-tag cell sub-queues.
#[derive(Debug, Clone)]
pub struct ModeScheduler {
    queue: VecDeque<FormTag>,
    short_role: CellRole,
    long_role: CellRole,
    short_cells: Cycler,
    long_cells: Cycler,
}

impl ModeScheduler {
    /// A scheduler whose `Short` tag draws from a catalog of `short_len`
    /// cells in `short_role`, and `Long` from `long_len` cells in `long_role`.
    pub fn new(short_role: CellRole, short_len: usize, long_role: CellRole, long_len: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            short_role,
            long_role,
            short_cells: Cycler::new(short_len),
            long_cells: Cycler::new(long_len),
        }
    }

    /// Head of the tag queue, refilling and shuffling when empty.
    pub fn peek<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FormTag {
        if let Some(tag) = self.queue.front() {
            return *tag;
        }

        let mut tags = Vec::with_capacity(LONG_PER_QUEUE + SHORT_PER_QUEUE);
        tags.extend(std::iter::repeat(FormTag::Long).take(LONG_PER_QUEUE));
        tags.extend(std::iter::repeat(FormTag::Short).take(SHORT_PER_QUEUE));
        tags.shuffle(rng);
        debug!(?tags, "mode scheduler refilled");

        let head = tags[0];
        self.queue = tags.into();
        head
    }

    /// Consumes the head tag. Call only after a successful phrase.
    pub fn advance(&mut self) {
        self.queue.pop_front();
    }

    /// Tags left in the current queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Catalog role that supplies opening cells for `tag`.
    pub fn role(&self, tag: FormTag) -> CellRole {
        match tag {
            FormTag::Long => self.long_role,
            FormTag::Short => self.short_role,
        }
    }

    /// Next cell index from `tag`'s sub-queue. Sub-queues advance on every
    /// draw, successful or not.
    pub fn draw<R: Rng + ?Sized>(&mut self, tag: FormTag, rng: &mut R) -> Option<usize> {
        match tag {
            FormTag::Long => self.long_cells.next_index(rng),
            FormTag::Short => self.short_cells.next_index(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;

    fn scheduler() -> ModeScheduler {
        ModeScheduler::new(CellRole::Biii, 3, CellRole::LongBiii, 2)
    }

    #[test]
    fn test_nine_advances_split_six_three() {
        let mut rng = create_rng(11);
        let mut sched = scheduler();

        for _ in 0..4 {
            let mut long = 0;
            let mut short = 0;
            for _ in 0..9 {
                match sched.peek(&mut rng) {
                    FormTag::Long => long += 1,
                    FormTag::Short => short += 1,
                }
                sched.advance();
            }
            assert_eq!((long, short), (6, 3));
            assert_eq!(sched.remaining(), 0);
        }
    }

    #[test]
    fn test_peek_without_advance_repeats() {
        let mut rng = create_rng(5);
        let mut sched = scheduler();
        let first = sched.peek(&mut rng);
        for _ in 0..10 {
            assert_eq!(sched.peek(&mut rng), first);
        }
        assert_eq!(sched.remaining(), 9);
    }

    #[test]
    fn test_sub_queues_cover_their_catalogs() {
        let mut rng = create_rng(2);
        let mut sched = scheduler();

        let mut shorts: Vec<usize> = (0..3)
            .map(|_| sched.draw(FormTag::Short, &mut rng).unwrap())
            .collect();
        shorts.sort_unstable();
        assert_eq!(shorts, vec![0, 1, 2]);

        let mut longs: Vec<usize> = (0..2)
            .map(|_| sched.draw(FormTag::Long, &mut rng).unwrap())
            .collect();
        longs.sort_unstable();
        assert_eq!(longs, vec![0, 1]);

        assert_eq!(sched.role(FormTag::Long), CellRole::LongBiii);
        assert_eq!(sched.role(FormTag::Short), CellRole::Biii);
    }
}
