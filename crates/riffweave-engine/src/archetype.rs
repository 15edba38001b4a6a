//! The archetype table.
//!
//! Each [`Archetype`] maps to a static [`ArchetypeDef`]: how its phrase is
//! assembled, which lengths it accepts, how it is transposed into the
//! target key, which catalog its ending is snapped against, and which
//! cycler is reset after a failed attempt.
//!
//! Most archetypes are parameterizations of a handful of strategies (see
//! [`Plan`]); the table is data, the strategies live in
//! [`crate::assemble`].

use std::fmt;
use std::str::FromStr;

use riffweave_catalog::CellRole;
use riffweave_theory::{Key, Note};
use serde::{Serialize, Serializer};

use crate::error::GenerateError;

/// A named harmonic progression the engine can realize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Archetype {
    Sus4,
    Major,
    LongMajor,
    LongSus4,
    Short25Major,
    Long25Major,
    Short25Minor,
    Long25Minor,
    Turnaround,
    RhythmChanges56,
    Ii7ToV7,
    IiiToBiii,
    LongIiiToBiii,
    BiiiToIiOld,
    LongBiiiToIiOld,
    Backdoor25,
    ShortBackdoor25,
    Deceptive25,
    ShortDeceptive25,
    IvIv,
    ShortIvIv,
}

impl Archetype {
    /// Every archetype, in table order.
    pub const ALL: [Archetype; 21] = [
        Archetype::Sus4,
        Archetype::Major,
        Archetype::LongMajor,
        Archetype::LongSus4,
        Archetype::Short25Major,
        Archetype::Long25Major,
        Archetype::Short25Minor,
        Archetype::Long25Minor,
        Archetype::Turnaround,
        Archetype::RhythmChanges56,
        Archetype::Ii7ToV7,
        Archetype::IiiToBiii,
        Archetype::LongIiiToBiii,
        Archetype::BiiiToIiOld,
        Archetype::LongBiiiToIiOld,
        Archetype::Backdoor25,
        Archetype::ShortBackdoor25,
        Archetype::Deceptive25,
        Archetype::ShortDeceptive25,
        Archetype::IvIv,
        Archetype::ShortIvIv,
    ];

    /// Identifier used by callers and in output.
    pub fn id(self) -> &'static str {
        match self {
            Archetype::Sus4 => "7sus4",
            Archetype::Major => "major",
            Archetype::LongMajor => "long_major",
            Archetype::LongSus4 => "long_7sus4",
            Archetype::Short25Major => "short_25_major",
            Archetype::Long25Major => "long_25_major",
            Archetype::Short25Minor => "short_25_minor",
            Archetype::Long25Minor => "long_25_minor",
            Archetype::Turnaround => "turnaround",
            Archetype::RhythmChanges56 => "rhythm_changes_56",
            Archetype::Ii7ToV7 => "ii7_to_v7",
            Archetype::IiiToBiii => "iii_to_biii",
            Archetype::LongIiiToBiii => "long_iii_to_biii",
            Archetype::BiiiToIiOld => "biii_to_ii_old",
            Archetype::LongBiiiToIiOld => "long_biii_to_ii_old",
            Archetype::Backdoor25 => "backdoor_25",
            Archetype::ShortBackdoor25 => "short_backdoor_25",
            Archetype::Deceptive25 => "deceptive_25",
            Archetype::ShortDeceptive25 => "short_deceptive_25",
            Archetype::IvIv => "iv_iv",
            Archetype::ShortIvIv => "short_iv_iv",
        }
    }

    /// The static definition for this archetype.
    pub fn def(self) -> &'static ArchetypeDef {
        match self {
            Archetype::Sus4 => &SUS4,
            Archetype::Major => &MAJOR,
            Archetype::LongMajor => &LONG_MAJOR,
            Archetype::LongSus4 => &LONG_SUS4,
            Archetype::Short25Major => &SHORT_25_MAJOR,
            Archetype::Long25Major => &LONG_25_MAJOR,
            Archetype::Short25Minor => &SHORT_25_MINOR,
            Archetype::Long25Minor => &LONG_25_MINOR,
            Archetype::Turnaround => &TURNAROUND,
            Archetype::RhythmChanges56 => &RHYTHM_CHANGES_56,
            Archetype::Ii7ToV7 => &II7_TO_V7,
            Archetype::IiiToBiii => &III_TO_BIII,
            Archetype::LongIiiToBiii => &LONG_III_TO_BIII,
            Archetype::BiiiToIiOld => &BIII_TO_II_OLD,
            Archetype::LongBiiiToIiOld => &LONG_BIII_TO_II_OLD,
            Archetype::Backdoor25 => &BACKDOOR_25,
            Archetype::ShortBackdoor25 => &SHORT_BACKDOOR_25,
            Archetype::Deceptive25 => &DECEPTIVE_25,
            Archetype::ShortDeceptive25 => &SHORT_DECEPTIVE_25,
            Archetype::IvIv => &IV_IV,
            Archetype::ShortIvIv => &SHORT_IV_IV,
        }
    }

    /// Every catalog role the archetype may draw from or snap against.
    pub fn required_roles(self) -> Vec<CellRole> {
        let def = self.def();
        let mut roles = def.plan.roles();
        if let Plan::Substitute { delegate } = def.plan {
            roles.extend(delegate.required_roles());
        }
        roles.extend(def.cadence_pool);
        roles.sort_unstable();
        roles.dedup();
        roles
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Archetype {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .iter()
            .copied()
            .find(|a| a.id() == s)
            .ok_or_else(|| GenerateError::UnknownArchetype(s.to_string()))
    }
}

impl Serialize for Archetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Cycler lane a cell is drawn from. Lanes are what the retry policy resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    Left,
    Right,
    Resolution,
}

/// Restriction on a candidate's first note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartFilter {
    Any,
    /// First pitch class must be one of these.
    OneOf(&'static [u8]),
    /// First pitch class must be none of these.
    NoneOf(&'static [u8]),
}

impl StartFilter {
    pub fn allows(self, first: Note) -> bool {
        match self {
            StartFilter::Any => true,
            StartFilter::OneOf(pcs) => pcs.contains(&first.pitch_class),
            StartFilter::NoneOf(pcs) => !pcs.contains(&first.pitch_class),
        }
    }
}

/// One catalog position in an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub role: CellRole,
    pub start: StartFilter,
    /// Reject cells that are, or contain, a banned cell.
    pub exclude_banned: bool,
}

impl Slot {
    pub const fn any(role: CellRole) -> Self {
        Self {
            role,
            start: StartFilter::Any,
            exclude_banned: false,
        }
    }

    pub const fn starting(role: CellRole, start: StartFilter) -> Self {
        Self {
            role,
            start,
            exclude_banned: false,
        }
    }

    pub const fn unbanned(role: CellRole) -> Self {
        Self {
            role,
            start: StartFilter::Any,
            exclude_banned: true,
        }
    }
}

/// The first cell of an assembly, drawn from a lane's cycler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub slot: Slot,
    pub lane: Lane,
}

/// Which side of the anchor the partner joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// How a pair's partner cell is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerSearch {
    /// Draw from the lane's cycler until a compatible, unused cell appears.
    Scan(Lane),
    /// Draw from the lane's cycler at most catalog-length times, then fall
    /// back to the first compatible cell in catalog order.
    Bounded(Lane),
    /// Uniform choice among compatible, unused cells.
    Random,
}

/// Two joined cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairPlan {
    pub anchor: Anchor,
    pub partner: Slot,
    pub side: Side,
    pub search: PartnerSearch,
    /// Redraw the anchor until it passes its exclusion and has a
    /// compatible partner, instead of failing on the first draw.
    pub redraw_anchor: bool,
}

/// Opening of a scheduled archetype, chosen by its mode scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledBase {
    /// Catalog of 5-note cells the short form opens with.
    pub short_role: CellRole,
    /// Catalog of 9-note cells the long form opens with.
    pub long_role: CellRole,
    /// Cell joined left of the short-form opener.
    pub short_partner: Slot,
    pub short_search: PartnerSearch,
}

/// Where a chain starts before its left extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainBase {
    Anchor(Anchor),
    Pair(&'static PairPlan),
    Scheduled(&'static ScheduledBase),
}

/// Assembly strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Pair(&'static PairPlan),
    /// A base followed by cells added on the left, in order.
    Chain {
        base: ChainBase,
        extensions: &'static [Slot],
    },
    /// Assemble `delegate` and re-key it through the substitute table.
    Substitute { delegate: Archetype },
}

impl Plan {
    fn roles(&self) -> Vec<CellRole> {
        fn pair_roles(pair: &PairPlan) -> [CellRole; 2] {
            [pair.anchor.slot.role, pair.partner.role]
        }

        match *self {
            Plan::Pair(pair) => pair_roles(pair).to_vec(),
            Plan::Chain { base, extensions } => {
                let mut roles: Vec<CellRole> = extensions.iter().map(|s| s.role).collect();
                match base {
                    ChainBase::Anchor(anchor) => roles.push(anchor.slot.role),
                    ChainBase::Pair(pair) => roles.extend(pair_roles(pair)),
                    ChainBase::Scheduled(sched) => {
                        roles.extend([sched.short_role, sched.long_role, sched.short_partner.role])
                    }
                }
                roles
            }
            Plan::Substitute { .. } => Vec::new(),
        }
    }
}

/// Semitone stages applied to the assembled phrase, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transposition {
    /// `+key`.
    Key,
    /// `+(key + n) % 12`.
    KeyPlus(u8),
    /// `+2`, then `+(key + 10) % 12`.
    Backdoor,
    /// `+source`, `+(target - source + 12) % 12`, then `-1`, where `source`
    /// is the substitute key for the target.
    Substitute,
}

impl Transposition {
    /// Human-readable formula, for listings.
    pub fn describe(self) -> String {
        match self {
            Transposition::Key => "+key".to_string(),
            Transposition::KeyPlus(n) => format!("+(key+{n})%12"),
            Transposition::Backdoor => "+2, +(key+10)%12".to_string(),
            Transposition::Substitute => "+sub, +(key-sub+12)%12, -1".to_string(),
        }
    }
}

/// Static definition of one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeDef {
    pub plan: Plan,
    pub accepted_lengths: &'static [usize],
    pub transposition: Transposition,
    /// Catalog the trailing 5-note window is snapped against.
    pub cadence_pool: Option<CellRole>,
    /// Lane whose cycler is reset after a failed attempt.
    pub reset: Option<Lane>,
}

/// Cells that must never open a biii-family phrase, nor appear inside a
/// long biii cell.
pub const BANNED_CELLS: [[Note; 5]; 4] = [
    [
        Note::new(2, 4),
        Note::new(11, 3),
        Note::new(0, 4),
        Note::new(2, 4),
        Note::new(3, 4),
    ],
    [
        Note::new(11, 4),
        Note::new(9, 4),
        Note::new(6, 4),
        Note::new(7, 4),
        Note::new(8, 4),
    ],
    [
        Note::new(0, 4),
        Note::new(5, 4),
        Note::new(8, 4),
        Note::new(3, 4),
        Note::new(6, 4),
    ],
    [
        Note::new(9, 4),
        Note::new(2, 5),
        Note::new(11, 4),
        Note::new(6, 4),
        Note::new(3, 4),
    ],
];

/// Target key to the key whose minor ii-V the deceptive archetypes borrow.
pub const DECEPTIVE_SUBSTITUTES: [(Key, Key); 12] = [
    (Key::C, Key::E),
    (Key::G, Key::B),
    (Key::D, Key::FSharp),
    (Key::A, Key::Db),
    (Key::E, Key::Ab),
    (Key::B, Key::Eb),
    (Key::FSharp, Key::Bb),
    (Key::Db, Key::F),
    (Key::Ab, Key::C),
    (Key::Eb, Key::G),
    (Key::Bb, Key::D),
    (Key::F, Key::A),
];

const PITCH_G: u8 = 7;
const NINE: &[usize] = &[9];
const SEVENTEEN: &[usize] = &[17];

const fn anchor(role: CellRole, lane: Lane) -> Anchor {
    Anchor {
        slot: Slot::any(role),
        lane,
    }
}

const fn basic(plan: &'static PairPlan) -> ArchetypeDef {
    ArchetypeDef {
        plan: Plan::Pair(plan),
        accepted_lengths: NINE,
        transposition: Transposition::Key,
        cadence_pool: None,
        reset: None,
    }
}

static SUS4_PAIR: PairPlan = PairPlan {
    anchor: anchor(CellRole::Sus4, Lane::Left),
    partner: Slot::any(CellRole::Sus4),
    side: Side::Right,
    search: PartnerSearch::Scan(Lane::Right),
    redraw_anchor: false,
};

static MAJOR_PAIR: PairPlan = PairPlan {
    anchor: anchor(CellRole::Major, Lane::Left),
    partner: Slot::any(CellRole::Major),
    side: Side::Right,
    search: PartnerSearch::Scan(Lane::Right),
    redraw_anchor: false,
};

static SHORT_25_MAJOR_PAIR: PairPlan = PairPlan {
    anchor: anchor(CellRole::MajorResolution, Lane::Right),
    partner: Slot::any(CellRole::Two),
    side: Side::Left,
    search: PartnerSearch::Bounded(Lane::Left),
    redraw_anchor: false,
};

static SHORT_25_MINOR_PAIR: PairPlan = PairPlan {
    anchor: anchor(CellRole::MinorC, Lane::Right),
    partner: Slot::any(CellRole::MinorB),
    side: Side::Left,
    search: PartnerSearch::Bounded(Lane::Left),
    redraw_anchor: false,
};

static III_TO_BIII_PAIR: PairPlan = PairPlan {
    anchor: Anchor {
        slot: Slot::unbanned(CellRole::Biii),
        lane: Lane::Right,
    },
    partner: Slot::any(CellRole::PreBiii),
    side: Side::Left,
    search: PartnerSearch::Scan(Lane::Left),
    redraw_anchor: true,
};

static BIII_TO_II_PAIR: PairPlan = PairPlan {
    anchor: Anchor {
        slot: Slot::unbanned(CellRole::BaseBiii),
        lane: Lane::Right,
    },
    partner: Slot::starting(CellRole::Sus4Up2, StartFilter::NoneOf(&[PITCH_G])),
    side: Side::Left,
    search: PartnerSearch::Random,
    redraw_anchor: true,
};

static III_TO_BIII_SCHEDULE: ScheduledBase = ScheduledBase {
    short_role: CellRole::Biii,
    long_role: CellRole::LongBiii,
    short_partner: Slot::any(CellRole::PreBiii),
    short_search: PartnerSearch::Scan(Lane::Left),
};

static BIII_TO_II_SCHEDULE: ScheduledBase = ScheduledBase {
    short_role: CellRole::BaseBiii,
    long_role: CellRole::LongBaseBiii,
    short_partner: Slot::unbanned(CellRole::BaseBiii),
    short_search: PartnerSearch::Random,
};

static SUS4: ArchetypeDef = basic(&SUS4_PAIR);
static MAJOR: ArchetypeDef = basic(&MAJOR_PAIR);

static LONG_MAJOR: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::Major, Lane::Right)),
        extensions: &[
            Slot::any(CellRole::Major),
            Slot::any(CellRole::Major),
            Slot::any(CellRole::Major),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: Some(Lane::Right),
};

static LONG_SUS4: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::Sus4, Lane::Right)),
        extensions: &[
            Slot::any(CellRole::Sus4),
            Slot::any(CellRole::Sus4),
            Slot::any(CellRole::Sus4),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: Some(Lane::Right),
};

static SHORT_25_MAJOR: ArchetypeDef = ArchetypeDef {
    cadence_pool: Some(CellRole::MajorResolution),
    ..basic(&SHORT_25_MAJOR_PAIR)
};

static LONG_25_MAJOR: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::MajorResolution, Lane::Resolution)),
        extensions: &[
            Slot::any(CellRole::Two),
            Slot::any(CellRole::Sus4),
            Slot::any(CellRole::Sus4),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: Some(CellRole::MajorResolution),
    reset: None,
};

static SHORT_25_MINOR: ArchetypeDef = ArchetypeDef {
    cadence_pool: Some(CellRole::MinorC),
    ..basic(&SHORT_25_MINOR_PAIR)
};

static LONG_25_MINOR: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Pair(&SHORT_25_MINOR_PAIR),
        extensions: &[Slot::any(CellRole::Sus4Down4), Slot::any(CellRole::Sus4Down4)],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: Some(CellRole::MinorC),
    reset: None,
};

static TURNAROUND: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::MajorResolution, Lane::Right)),
        extensions: &[
            Slot::any(CellRole::Two),
            Slot::any(CellRole::MinorCDown2),
            Slot::any(CellRole::Turnaround),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::KeyPlus(7),
    cadence_pool: Some(CellRole::MajorResolution),
    reset: Some(Lane::Right),
};

static RHYTHM_CHANGES_56: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::RhythmCadence, Lane::Resolution)),
        extensions: &[
            Slot::any(CellRole::Sus4Up5),
            Slot::any(CellRole::Sus4),
            // E, G or D
            Slot::starting(CellRole::Sus4, StartFilter::OneOf(&[4, 7, 2])),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: Some(CellRole::RhythmCadence),
    reset: Some(Lane::Resolution),
};

static II7_TO_V7: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::Sus4Down5, Lane::Resolution)),
        extensions: &[
            Slot::any(CellRole::Sus4Down5),
            Slot::any(CellRole::Sus4Up2),
            Slot::any(CellRole::Sus4Up2),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: Some(CellRole::Sus4Down5),
    reset: Some(Lane::Resolution),
};

static III_TO_BIII: ArchetypeDef = basic(&III_TO_BIII_PAIR);

static LONG_III_TO_BIII: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Scheduled(&III_TO_BIII_SCHEDULE),
        extensions: &[Slot::any(CellRole::PreBiii), Slot::any(CellRole::Major)],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: None,
};

static BIII_TO_II_OLD: ArchetypeDef = basic(&BIII_TO_II_PAIR);

static LONG_BIII_TO_II_OLD: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Scheduled(&BIII_TO_II_SCHEDULE),
        extensions: &[
            Slot::any(CellRole::Sus4Up2),
            Slot::starting(CellRole::Sus4Up2, StartFilter::NoneOf(&[PITCH_G])),
        ],
    },
    // 20 when only short-form material is available
    accepted_lengths: &[17, 20],
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: None,
};

static BACKDOOR_25: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::MajorResolutionDown5, Lane::Resolution)),
        extensions: &[
            Slot::any(CellRole::TwoDown2),
            Slot::any(CellRole::Sus4Down2),
            Slot::any(CellRole::Sus4Down2),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Backdoor,
    cadence_pool: Some(CellRole::MajorResolutionDown5),
    reset: Some(Lane::Resolution),
};

static SHORT_BACKDOOR_25: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::MajorResolutionDown5, Lane::Resolution)),
        extensions: &[Slot::any(CellRole::TwoDown2)],
    },
    accepted_lengths: NINE,
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: Some(Lane::Resolution),
};

static DECEPTIVE_25: ArchetypeDef = ArchetypeDef {
    plan: Plan::Substitute {
        delegate: Archetype::Long25Minor,
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Substitute,
    cadence_pool: Some(CellRole::MinorC),
    reset: None,
};

static SHORT_DECEPTIVE_25: ArchetypeDef = ArchetypeDef {
    plan: Plan::Substitute {
        delegate: Archetype::Short25Minor,
    },
    accepted_lengths: NINE,
    transposition: Transposition::Substitute,
    cadence_pool: Some(CellRole::MinorC),
    reset: None,
};

static IV_IV: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::BaseMajorResolutionDown5, Lane::Resolution)),
        extensions: &[
            Slot::any(CellRole::TwoDown2),
            Slot::any(CellRole::MajorUp5),
            Slot::any(CellRole::MajorUp5),
        ],
    },
    accepted_lengths: SEVENTEEN,
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: Some(Lane::Resolution),
};

static SHORT_IV_IV: ArchetypeDef = ArchetypeDef {
    plan: Plan::Chain {
        base: ChainBase::Anchor(anchor(CellRole::BaseMajorResolutionDown5, Lane::Resolution)),
        extensions: &[Slot::any(CellRole::MajorUp5)],
    },
    accepted_lengths: NINE,
    transposition: Transposition::Key,
    cadence_pool: None,
    reset: Some(Lane::Resolution),
};

/// Looks up the substitute key for `target` in `table`.
pub fn resolve_substitute(table: &[(Key, Key)], target: Key) -> Option<Key> {
    table
        .iter()
        .find(|(from, _)| *from == target)
        .map(|(_, to)| *to)
}

/// Semitone stages for `def` in `key`, in application order.
///
/// `substitute` must be the resolved substitute key when the definition
/// uses [`Transposition::Substitute`]; it is ignored otherwise.
pub fn transposition_stages(
    transposition: Transposition,
    key: Key,
    substitute: Option<Key>,
) -> Vec<i32> {
    let k = key.semitones() as i32;
    match transposition {
        Transposition::Key => vec![k],
        Transposition::KeyPlus(n) => vec![(k + n as i32) % 12],
        Transposition::Backdoor => vec![2, (k + 10) % 12],
        Transposition::Substitute => {
            let s = substitute.map_or(k, |sub| sub.semitones() as i32);
            vec![s, (k - s + 12) % 12, -1]
        }
    }
}
