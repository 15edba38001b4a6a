//! Static join analysis over a catalog set.
//!
//! Answers whether every slot of an archetype has at least one cell that
//! can ever join, by walking the plan over sets of opening pitch classes
//! instead of concrete phrases. Sampling order is irrelevant here, and
//! reuse is only enforced between the two cells of a pair, so a plan that
//! passes can still fail an individual attempt.

use std::collections::BTreeSet;

use riffweave_catalog::{Catalog, CatalogSet, Cell, CellRole};

use crate::archetype::{Archetype, ChainBase, PairPlan, Plan, ScheduledBase, Side, Slot};
use crate::assemble::is_banned;

/// Pitch classes a partial phrase may open with.
type Openings = BTreeSet<u8>;

/// The first role, in assembly order, whose slot has no joinable cell.
///
/// Returns `None` when every slot can be filled. Missing roles are
/// reported the same way as roles with nothing compatible.
///
/// # Examples
/// ```
/// use riffweave_catalog::{CatalogSet, CellRole};
/// use riffweave_engine::{joinable::first_unjoinable, Archetype};
///
/// let catalogs = CatalogSet::from_json(
///     r#"{"major": [["C3", "E3", "G3"], ["G3", "D3", "C3"], ["A3", "B3"]]}"#,
/// )?;
/// assert_eq!(first_unjoinable(Archetype::Major, &catalogs), None);
///
/// let catalogs = CatalogSet::from_json(r#"{"major": [["C3", "E3"], ["A3", "B3"]]}"#)?;
/// assert_eq!(first_unjoinable(Archetype::Major, &catalogs), Some(CellRole::Major));
/// # Ok::<(), riffweave_catalog::CatalogError>(())
/// ```
pub fn first_unjoinable(archetype: Archetype, catalogs: &CatalogSet) -> Option<CellRole> {
    plan_openings(&archetype.def().plan, catalogs).err()
}

fn plan_openings(plan: &Plan, catalogs: &CatalogSet) -> Result<(), CellRole> {
    match *plan {
        Plan::Pair(pair) => pair_openings(pair, catalogs).map(drop),
        Plan::Chain { base, extensions } => {
            let bases = match base {
                ChainBase::Anchor(anchor) => vec![anchor_openings(&anchor.slot, catalogs)?],
                ChainBase::Pair(pair) => vec![pair_openings(pair, catalogs)?],
                // the scheduler asks for both forms, so both must work
                ChainBase::Scheduled(sched) => scheduled_openings(sched, catalogs)?,
            };
            for mut openings in bases {
                for slot in extensions {
                    openings = extend_openings(&openings, slot, catalogs)?;
                }
            }
            Ok(())
        }
        Plan::Substitute { delegate } => plan_openings(&delegate.def().plan, catalogs),
    }
}

fn catalog(catalogs: &CatalogSet, role: CellRole) -> Result<&Catalog, CellRole> {
    catalogs.get(role).map_err(|_| role)
}

fn admissible(slot: &Slot, cell: &Cell) -> bool {
    slot.start.allows(cell.first()) && !(slot.exclude_banned && is_banned(cell))
}

fn non_empty(openings: Openings, role: CellRole) -> Result<Openings, CellRole> {
    if openings.is_empty() {
        Err(role)
    } else {
        Ok(openings)
    }
}

fn anchor_openings(slot: &Slot, catalogs: &CatalogSet) -> Result<Openings, CellRole> {
    let openings = catalog(catalogs, slot.role)?
        .cells
        .iter()
        .filter(|cell| admissible(slot, cell))
        .map(|cell| cell.first().pitch_class)
        .collect();
    non_empty(openings, slot.role)
}

/// Openings after joining a cell for `slot` on the left of any phrase
/// opening with one of `openings`.
fn extend_openings(
    openings: &Openings,
    slot: &Slot,
    catalogs: &CatalogSet,
) -> Result<Openings, CellRole> {
    let next = catalog(catalogs, slot.role)?
        .cells
        .iter()
        .filter(|cell| admissible(slot, cell) && openings.contains(&cell.last().pitch_class))
        .map(|cell| cell.first().pitch_class)
        .collect();
    non_empty(next, slot.role)
}

/// Openings of a two-cell pair with an admissible, distinct partner.
fn joined_pair_openings(
    anchor: &Slot,
    partner: &Slot,
    side: Side,
    catalogs: &CatalogSet,
) -> Result<Openings, CellRole> {
    let anchors = catalog(catalogs, anchor.role)?;
    let partners = catalog(catalogs, partner.role)?;

    let mut anchored = false;
    let mut openings = Openings::new();
    for (a, anchor_cell) in anchors.iter() {
        if !admissible(anchor, anchor_cell) {
            continue;
        }
        anchored = true;
        for (p, partner_cell) in partners.iter() {
            if anchor.role == partner.role && a == p {
                continue;
            }
            if !admissible(partner, partner_cell) {
                continue;
            }
            match side {
                Side::Left if partner_cell.last().same_pitch_class(anchor_cell.first()) => {
                    openings.insert(partner_cell.first().pitch_class);
                }
                Side::Right if partner_cell.first().same_pitch_class(anchor_cell.last()) => {
                    openings.insert(anchor_cell.first().pitch_class);
                }
                _ => {}
            }
        }
    }

    if !anchored {
        return Err(anchor.role);
    }
    non_empty(openings, partner.role)
}

fn pair_openings(pair: &PairPlan, catalogs: &CatalogSet) -> Result<Openings, CellRole> {
    joined_pair_openings(&pair.anchor.slot, &pair.partner, pair.side, catalogs)
}

fn scheduled_openings(
    sched: &ScheduledBase,
    catalogs: &CatalogSet,
) -> Result<Vec<Openings>, CellRole> {
    let long = anchor_openings(&Slot::unbanned(sched.long_role), catalogs)?;
    let short = joined_pair_openings(
        &Slot::unbanned(sched.short_role),
        &sched.short_partner,
        Side::Left,
        catalogs,
    )?;
    Ok(vec![long, short])
}
