//! Phrase assembly: executes an archetype [`Plan`] against a catalog set.
//!
//! One [`Assembler`] lives for exactly one attempt. It owns the attempt's
//! reuse set, keyed by `(role, cell index)`, so a cell drawn for one slot
//! is never drawn again for another slot fed by the same catalog. Cyclers
//! ([`Lanes`]) and the mode scheduler outlive the attempt and are borrowed.
//!
//! Every slot either yields a joined phrase or an
//! [`AttemptFailure::NoCandidate`], which abandons the attempt.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use riffweave_catalog::{Catalog, CatalogSet, Cell, CellRole};
use riffweave_theory::Note;
use tracing::debug;

use crate::archetype::{
    ChainBase, Lane, PairPlan, PartnerSearch, Plan, ScheduledBase, Side, Slot, BANNED_CELLS,
};
use crate::chain::{extend_left, extend_right};
use crate::cycler::Cycler;
use crate::error::AttemptFailure;
use crate::scheduler::{FormTag, ModeScheduler};

#[cfg(test)]
mod tests;

/// Anchor draws allowed when an anchor must pass its exclusion and have a
/// partner before the attempt gives up.
pub const ANCHOR_REDRAWS: usize = 50;

/// Per-call cyclers, one per lane and catalog.
#[derive(Debug, Default)]
pub struct Lanes {
    cyclers: BTreeMap<(Lane, CellRole), Cycler>,
}

impl Lanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next index from `lane`'s cycler over `catalog`, created on first use.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        lane: Lane,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Option<usize> {
        self.cyclers
            .entry((lane, catalog.role))
            .or_insert_with(|| Cycler::new(catalog.len()))
            .next_index(rng)
    }

    /// Resets every cycler on `lane`.
    pub fn reset(&mut self, lane: Lane) {
        for ((l, _), cycler) in self.cyclers.iter_mut() {
            if *l == lane {
                cycler.reset_permutation();
            }
        }
    }
}

/// An assembled, untransposed phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub notes: Vec<Note>,
    /// Form used, for scheduled archetypes.
    pub form: Option<FormTag>,
}

/// Where an anchor cell comes from.
#[derive(Debug, Clone, Copy)]
enum AnchorSource {
    Lane(Lane),
    Scheduler(FormTag),
}

/// True if `cell` is, or contains, a banned cell.
pub fn is_banned(cell: &Cell) -> bool {
    BANNED_CELLS.iter().any(|banned| cell.contains_window(banned))
}

/// Builds one candidate phrase.
pub struct Assembler<'a, R: Rng + ?Sized> {
    catalogs: &'a CatalogSet,
    rng: &'a mut R,
    lanes: &'a mut Lanes,
    scheduler: Option<&'a mut ModeScheduler>,
    used: BTreeSet<(CellRole, usize)>,
}

impl<'a, R: Rng + ?Sized> Assembler<'a, R> {
    pub fn new(
        catalogs: &'a CatalogSet,
        rng: &'a mut R,
        lanes: &'a mut Lanes,
        scheduler: Option<&'a mut ModeScheduler>,
    ) -> Self {
        Self {
            catalogs,
            rng,
            lanes,
            scheduler,
            used: BTreeSet::new(),
        }
    }

    /// Executes `plan`.
    pub fn assemble(&mut self, plan: &Plan) -> Result<Assembled, AttemptFailure> {
        match *plan {
            Plan::Pair(pair) => Ok(Assembled {
                notes: self.pair(pair)?,
                form: None,
            }),
            Plan::Chain { base, extensions } => {
                let (mut notes, form) = match base {
                    ChainBase::Anchor(anchor) => {
                        let catalog = self.catalog(anchor.slot.role)?;
                        let index = self
                            .draw_anchor(AnchorSource::Lane(anchor.lane), catalog)
                            .filter(|i| self.passes_exclusions(&anchor.slot, &catalog.cells[*i]))
                            .ok_or(AttemptFailure::NoCandidate {
                                role: anchor.slot.role,
                            })?;
                        self.used.insert((anchor.slot.role, index));
                        (catalog.cells[index].notes().to_vec(), None)
                    }
                    ChainBase::Pair(pair) => (self.pair(pair)?, None),
                    ChainBase::Scheduled(sched) => {
                        let (notes, tag) = self.scheduled(sched)?;
                        (notes, Some(tag))
                    }
                };
                for slot in extensions {
                    notes = self.extend(notes, slot)?;
                }
                Ok(Assembled { notes, form })
            }
            Plan::Substitute { delegate } => self.assemble(&delegate.def().plan),
        }
    }

    fn catalog(&self, role: CellRole) -> Result<&'a Catalog, AttemptFailure> {
        let catalogs: &'a CatalogSet = self.catalogs;
        catalogs
            .get(role)
            .map_err(|_| AttemptFailure::NoCandidate { role })
    }

    fn draw_anchor(&mut self, source: AnchorSource, catalog: &Catalog) -> Option<usize> {
        match source {
            AnchorSource::Lane(lane) => self.lanes.draw(lane, catalog, &mut *self.rng),
            AnchorSource::Scheduler(tag) => {
                let scheduler = self.scheduler.as_deref_mut()?;
                scheduler.draw(tag, &mut *self.rng)
            }
        }
    }

    fn passes_exclusions(&self, slot: &Slot, cell: &Cell) -> bool {
        slot.start.allows(cell.first()) && !(slot.exclude_banned && is_banned(cell))
    }

    /// Whether cell `index` of `slot`'s catalog may join at `join` on `side`.
    fn admits(&self, slot: &Slot, index: usize, cell: &Cell, join: Note, side: Side) -> bool {
        let boundary = match side {
            Side::Left => cell.last(),
            Side::Right => cell.first(),
        };
        boundary.same_pitch_class(join)
            && self.passes_exclusions(slot, cell)
            && !self.used.contains(&(slot.role, index))
    }

    /// Chooses a cell for `slot` joining at `join` on `side`.
    fn pick(
        &mut self,
        slot: &Slot,
        catalog: &Catalog,
        join: Note,
        side: Side,
        search: PartnerSearch,
    ) -> Result<usize, AttemptFailure> {
        let no_candidate = AttemptFailure::NoCandidate { role: slot.role };
        let compatible: Vec<usize> = catalog
            .iter()
            .filter(|(i, cell)| self.admits(slot, *i, cell, join, side))
            .map(|(i, _)| i)
            .collect();
        if compatible.is_empty() {
            return Err(no_candidate);
        }

        match search {
            PartnerSearch::Scan(lane) => {
                // any index recurs within two rounds
                for _ in 0..catalog.len() * 2 {
                    let index = self
                        .lanes
                        .draw(lane, catalog, &mut *self.rng)
                        .ok_or(no_candidate.clone())?;
                    if compatible.contains(&index) {
                        return Ok(index);
                    }
                }
                Err(no_candidate)
            }
            PartnerSearch::Bounded(lane) => {
                for _ in 0..catalog.len() {
                    let index = self
                        .lanes
                        .draw(lane, catalog, &mut *self.rng)
                        .ok_or(no_candidate.clone())?;
                    if compatible.contains(&index) {
                        return Ok(index);
                    }
                }
                Ok(compatible[0])
            }
            PartnerSearch::Random => Ok(compatible[self.rng.gen_range(0..compatible.len())]),
        }
    }

    /// Joins a cell for `slot` onto `phrase` on `side`.
    fn join(
        &mut self,
        phrase: &[Note],
        slot: &Slot,
        side: Side,
        search: PartnerSearch,
    ) -> Result<Vec<Note>, AttemptFailure> {
        let no_candidate = AttemptFailure::NoCandidate { role: slot.role };
        let catalog = self.catalog(slot.role)?;
        let join = match side {
            Side::Left => phrase.first(),
            Side::Right => phrase.last(),
        }
        .copied()
        .ok_or(no_candidate.clone())?;

        let index = self.pick(slot, catalog, join, side, search)?;
        self.used.insert((slot.role, index));
        let cell = &catalog.cells[index];

        let joined = match side {
            Side::Left => extend_left(cell, phrase),
            Side::Right => extend_right(phrase, cell),
        };
        joined.ok_or(no_candidate)
    }

    /// Adds a left extension, chosen uniformly among admissible cells.
    fn extend(&mut self, phrase: Vec<Note>, slot: &Slot) -> Result<Vec<Note>, AttemptFailure> {
        self.join(&phrase, slot, Side::Left, PartnerSearch::Random)
    }

    /// Draws an anchor from `source` and joins a partner to it.
    ///
    /// With `draws > 1`, anchors that fail their exclusion or have no
    /// admissible partner are skipped and redrawn.
    fn anchored_pair(
        &mut self,
        anchor: &Slot,
        source: AnchorSource,
        partner: &Slot,
        side: Side,
        search: PartnerSearch,
        draws: usize,
    ) -> Result<Vec<Note>, AttemptFailure> {
        let catalog = self.catalog(anchor.role)?;
        let partner_catalog = self.catalog(partner.role)?;

        for _ in 0..draws {
            let Some(index) = self.draw_anchor(source, catalog) else {
                break;
            };
            let cell = &catalog.cells[index];
            if !self.passes_exclusions(anchor, cell) {
                debug!(role = %anchor.role, index, "anchor excluded");
                continue;
            }

            self.used.insert((anchor.role, index));
            let join = match side {
                Side::Left => cell.first(),
                Side::Right => cell.last(),
            };
            let has_partner = partner_catalog
                .iter()
                .any(|(i, c)| self.admits(partner, i, c, join, side));
            if !has_partner && draws > 1 {
                self.used.remove(&(anchor.role, index));
                continue;
            }

            return self.join(cell.notes(), partner, side, search);
        }

        Err(AttemptFailure::NoCandidate { role: anchor.role })
    }

    fn pair(&mut self, pair: &PairPlan) -> Result<Vec<Note>, AttemptFailure> {
        let draws = if pair.redraw_anchor { ANCHOR_REDRAWS } else { 1 };
        self.anchored_pair(
            &pair.anchor.slot,
            AnchorSource::Lane(pair.anchor.lane),
            &pair.partner,
            pair.side,
            pair.search,
            draws,
        )
    }

    /// Opening of a scheduled archetype, per the scheduler's head tag.
    fn scheduled(&mut self, base: &ScheduledBase) -> Result<(Vec<Note>, FormTag), AttemptFailure> {
        let tag = match self.scheduler.as_deref_mut() {
            Some(scheduler) => scheduler.peek(&mut *self.rng),
            None => {
                return Err(AttemptFailure::NoCandidate {
                    role: base.long_role,
                })
            }
        };

        match tag {
            FormTag::Long => {
                let slot = Slot::unbanned(base.long_role);
                let catalog = self.catalog(slot.role)?;
                for _ in 0..ANCHOR_REDRAWS {
                    let Some(index) = self.draw_anchor(AnchorSource::Scheduler(tag), catalog)
                    else {
                        break;
                    };
                    let cell = &catalog.cells[index];
                    if self.passes_exclusions(&slot, cell) {
                        self.used.insert((slot.role, index));
                        return Ok((cell.notes().to_vec(), tag));
                    }
                }
                Err(AttemptFailure::NoCandidate { role: slot.role })
            }
            FormTag::Short => {
                let notes = self.anchored_pair(
                    &Slot::unbanned(base.short_role),
                    AnchorSource::Scheduler(tag),
                    &base.short_partner,
                    Side::Left,
                    base.short_search,
                    ANCHOR_REDRAWS,
                )?;
                Ok((notes, tag))
            }
        }
    }
}
