//! Tests for phrase assembly.

use super::*;
use crate::archetype::{Anchor, Archetype, StartFilter};
use crate::rng::create_rng;
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn notes(names: &str) -> Vec<Note> {
    names.split_whitespace().map(|n| n.parse().unwrap()).collect()
}

fn catalog(role: CellRole, cells: &[&str]) -> Catalog {
    Catalog::new(
        role,
        cells.iter().map(|c| Cell::new(notes(c)).unwrap()).collect(),
    )
}

fn set(catalogs: Vec<Catalog>) -> CatalogSet {
    let mut set = CatalogSet::new();
    for catalog in catalogs {
        set.insert(catalog);
    }
    set
}

fn run(catalogs: &CatalogSet, plan: &Plan, seed: u64) -> Result<Assembled, AttemptFailure> {
    let mut rng = create_rng(seed);
    let mut lanes = Lanes::new();
    Assembler::new(catalogs, &mut rng, &mut lanes, None).assemble(plan)
}

const C_CELLS: [&str; 4] = [
    "C3 D3 E3 D3 C3",
    "C3 B2 A2 B2 C3",
    "C3 Eb3 F3 Eb3 C3",
    "C3 D3 C3 B2 C3",
];

// ============================================================================
// Pairs
// ============================================================================

#[test]
fn test_pair_joins_on_shared_note() {
    let catalogs = set(vec![catalog(CellRole::Sus4, &C_CELLS[..2])]);

    for seed in 0..8 {
        let phrase = run(&catalogs, &Archetype::Sus4.def().plan, seed).unwrap();
        assert_eq!(phrase.notes.len(), 9);
        assert_eq!(phrase.form, None);

        let left = &phrase.notes[..5];
        let right = &phrase.notes[4..];
        assert!(C_CELLS[..2].iter().any(|c| notes(c) == left));
        assert!(C_CELLS[..2].iter().any(|c| notes(c) == right));
        assert_ne!(left, right, "cell reused within one attempt");
    }
}

#[test]
fn test_pair_without_unused_partner_fails() {
    let catalogs = set(vec![catalog(CellRole::Sus4, &C_CELLS[..1])]);
    assert_eq!(
        run(&catalogs, &Archetype::Sus4.def().plan, 3),
        Err(AttemptFailure::NoCandidate {
            role: CellRole::Sus4
        })
    );
}

#[test]
fn test_bounded_search_finds_only_compatible_partner() {
    let catalogs = set(vec![
        catalog(CellRole::MajorResolution, &["C4 E4 G4 E4 C4"]),
        catalog(
            CellRole::Two,
            &[
                "D3 F3 A3 F3 D3",
                "A3 G3 F3 E3 D3",
                "D3 E3 F3 A3 C4",
                "F3 A3 C4 A3 F3",
            ],
        ),
    ]);

    for seed in 0..8 {
        let mut rng = create_rng(seed);
        let mut lanes = Lanes::new();
        // leave the partner lane mid-round
        let two = catalogs.get(CellRole::Two).unwrap();
        lanes.draw(Lane::Left, two, &mut rng);
        lanes.draw(Lane::Left, two, &mut rng);

        let phrase = Assembler::new(&catalogs, &mut rng, &mut lanes, None)
            .assemble(&Archetype::Short25Major.def().plan)
            .unwrap();
        assert_eq!(phrase.notes, notes("D3 E3 F3 A3 C4 E4 G4 E4 C4"));
    }
}

// ============================================================================
// Chains
// ============================================================================

#[test]
fn test_chain_adds_cells_on_the_left() {
    let catalogs = set(vec![catalog(CellRole::Major, &C_CELLS)]);

    for seed in 0..8 {
        let phrase = run(&catalogs, &Archetype::LongMajor.def().plan, seed).unwrap();
        assert_eq!(phrase.notes.len(), 17);

        // four distinct cells, each sharing its boundary note
        let mut cells: Vec<Vec<Note>> = (0..4)
            .map(|i| phrase.notes[i * 4..i * 4 + 5].to_vec())
            .collect();
        for c in &cells {
            assert!(C_CELLS.iter().any(|known| notes(known) == *c));
        }
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 4);
    }
}

#[test]
fn test_chain_runs_out_of_unused_cells() {
    let catalogs = set(vec![catalog(CellRole::Major, &C_CELLS[..3])]);
    assert_eq!(
        run(&catalogs, &Archetype::LongMajor.def().plan, 0),
        Err(AttemptFailure::NoCandidate {
            role: CellRole::Major
        })
    );
}

static FILTERED_PAIR: PairPlan = PairPlan {
    anchor: Anchor {
        slot: Slot::any(CellRole::Major),
        lane: Lane::Right,
    },
    partner: Slot::starting(CellRole::Sus4, StartFilter::OneOf(&[4])),
    side: Side::Left,
    search: PartnerSearch::Random,
    redraw_anchor: false,
};

#[test]
fn test_start_filter_restricts_candidates() {
    let catalogs = set(vec![
        catalog(CellRole::Major, &["C3 E3 G3"]),
        catalog(CellRole::Sus4, &["D3 E3 C3", "E3 D3 C3", "G3 A3 C3"]),
    ]);

    for seed in 0..8 {
        let phrase = run(&catalogs, &Plan::Pair(&FILTERED_PAIR), seed).unwrap();
        assert_eq!(phrase.notes, notes("E3 D3 C3 E3 G3"));
    }
}

// ============================================================================
// Banned cells and anchor redraws
// ============================================================================

#[test]
fn test_banned_detection() {
    assert!(is_banned(&Cell::new(notes("D4 B3 C4 D4 Eb4")).unwrap()));
    assert!(is_banned(
        &Cell::new(notes("G3 A4 D5 B4 F#4 D#4 E4 F4 G4")).unwrap()
    ));
    // same pitch classes, other octave
    assert!(!is_banned(&Cell::new(notes("D3 B2 C3 D3 Eb3")).unwrap()));
}

#[test]
fn test_banned_only_anchor_fails() {
    let catalogs = set(vec![
        catalog(CellRole::Biii, &["D4 B3 C4 D4 Eb4"]),
        catalog(CellRole::PreBiii, &["G3 A3 B3 C4 D4"]),
    ]);
    assert_eq!(
        run(&catalogs, &Archetype::IiiToBiii.def().plan, 1),
        Err(AttemptFailure::NoCandidate {
            role: CellRole::Biii
        })
    );
}

#[test]
fn test_anchor_redrawn_past_banned_and_partnerless() {
    let catalogs = set(vec![
        catalog(
            CellRole::Biii,
            &["D4 B3 C4 D4 Eb4", "E4 F4 G4 F4 E4", "C4 D4 Eb4 D4 C4"],
        ),
        catalog(CellRole::PreBiii, &["G3 A3 B3 A3 C4"]),
    ]);

    for seed in 0..8 {
        let phrase = run(&catalogs, &Archetype::IiiToBiii.def().plan, seed).unwrap();
        assert_eq!(phrase.notes, notes("G3 A3 B3 A3 C4 D4 Eb4 D4 C4"));
    }
}

// ============================================================================
// Scheduled forms
// ============================================================================

fn biii_catalogs() -> CatalogSet {
    set(vec![
        catalog(CellRole::Biii, &["C4 D4 Eb4 D4 C4", "C4 Bb3 Ab3 Bb3 C4"]),
        catalog(CellRole::LongBiii, &["C4 D4 Eb4 F4 G4 F4 Eb4 D4 C4"]),
        catalog(
            CellRole::PreBiii,
            &["C4 B3 A3 B3 C4", "C4 D4 E4 D4 C4", "C4 G3 A3 B3 C4"],
        ),
        catalog(CellRole::Major, &["C3 E3 G3 E3 C3"]),
    ])
}

#[test]
fn test_scheduled_forms_follow_queue() {
    let catalogs = biii_catalogs();
    let plan = Archetype::LongIiiToBiii.def().plan;
    let mut rng = create_rng(21);
    let mut scheduler = ModeScheduler::new(CellRole::Biii, 2, CellRole::LongBiii, 1);

    let mut long = 0;
    let mut short = 0;
    for _ in 0..9 {
        let mut lanes = Lanes::new();
        let phrase = Assembler::new(&catalogs, &mut rng, &mut lanes, Some(&mut scheduler))
            .assemble(&plan)
            .unwrap();
        assert_eq!(phrase.notes.len(), 17);
        match phrase.form {
            Some(FormTag::Long) => {
                long += 1;
                assert_eq!(
                    phrase.notes[8..].to_vec(),
                    notes("C4 D4 Eb4 F4 G4 F4 Eb4 D4 C4")
                );
            }
            Some(FormTag::Short) => short += 1,
            None => panic!("scheduled plan produced no form"),
        }
        scheduler.advance();
    }
    assert_eq!((long, short), (6, 3));
}

#[test]
fn test_scheduled_plan_needs_scheduler() {
    let catalogs = biii_catalogs();
    assert_eq!(
        run(&catalogs, &Archetype::LongIiiToBiii.def().plan, 0),
        Err(AttemptFailure::NoCandidate {
            role: CellRole::LongBiii
        })
    );
}

#[test]
fn test_lane_reset_starts_fresh_round() {
    let catalogs = set(vec![catalog(CellRole::Major, &C_CELLS)]);
    let major = catalogs.get(CellRole::Major).unwrap();
    let mut rng = create_rng(4);
    let mut lanes = Lanes::new();

    lanes.draw(Lane::Right, major, &mut rng);
    lanes.reset(Lane::Right);
    let mut round: Vec<usize> = (0..4)
        .map(|_| lanes.draw(Lane::Right, major, &mut rng).unwrap())
        .collect();
    round.sort_unstable();
    assert_eq!(round, vec![0, 1, 2, 3]);
}
