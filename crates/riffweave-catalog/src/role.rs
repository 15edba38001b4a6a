//! Harmonic roles that name each catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// The harmonic function a catalog's cells belong to.
///
/// Base roles are authored directly. Sibling roles are the same material
/// pre-transposed so that chaining can match pitch classes in the local
/// frame of a slot; they may be authored or derived from their base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    Sus4,
    Major,
    Two,
    MajorResolution,
    MinorB,
    MinorC,
    Turnaround,
    RhythmCadence,
    PreBiii,
    Biii,
    BaseBiii,
    LongBiii,
    LongBaseBiii,
    Sus4Up2,
    Sus4Down2,
    Sus4Up5,
    Sus4Down5,
    Sus4Down4,
    MajorUp5,
    TwoDown2,
    MinorCDown2,
    MajorResolutionDown5,
    BaseMajorResolutionDown5,
}

impl CellRole {
    /// Every role, base roles first.
    pub const ALL: [CellRole; 23] = [
        CellRole::Sus4,
        CellRole::Major,
        CellRole::Two,
        CellRole::MajorResolution,
        CellRole::MinorB,
        CellRole::MinorC,
        CellRole::Turnaround,
        CellRole::RhythmCadence,
        CellRole::PreBiii,
        CellRole::Biii,
        CellRole::BaseBiii,
        CellRole::LongBiii,
        CellRole::LongBaseBiii,
        CellRole::Sus4Up2,
        CellRole::Sus4Down2,
        CellRole::Sus4Up5,
        CellRole::Sus4Down5,
        CellRole::Sus4Down4,
        CellRole::MajorUp5,
        CellRole::TwoDown2,
        CellRole::MinorCDown2,
        CellRole::MajorResolutionDown5,
        CellRole::BaseMajorResolutionDown5,
    ];

    /// Name used in catalog files.
    pub fn name(self) -> &'static str {
        match self {
            CellRole::Sus4 => "sus4",
            CellRole::Major => "major",
            CellRole::Two => "two",
            CellRole::MajorResolution => "major_resolution",
            CellRole::MinorB => "minor_b",
            CellRole::MinorC => "minor_c",
            CellRole::Turnaround => "turnaround",
            CellRole::RhythmCadence => "rhythm_cadence",
            CellRole::PreBiii => "pre_biii",
            CellRole::Biii => "biii",
            CellRole::BaseBiii => "base_biii",
            CellRole::LongBiii => "long_biii",
            CellRole::LongBaseBiii => "long_base_biii",
            CellRole::Sus4Up2 => "sus4_up2",
            CellRole::Sus4Down2 => "sus4_down2",
            CellRole::Sus4Up5 => "sus4_up5",
            CellRole::Sus4Down5 => "sus4_down5",
            CellRole::Sus4Down4 => "sus4_down4",
            CellRole::MajorUp5 => "major_up5",
            CellRole::TwoDown2 => "two_down2",
            CellRole::MinorCDown2 => "minor_c_down2",
            CellRole::MajorResolutionDown5 => "major_resolution_down5",
            CellRole::BaseMajorResolutionDown5 => "base_major_resolution_down5",
        }
    }

    /// For sibling roles, the base role and the semitone shift that derives
    /// this role's cells from it.
    ///
    /// # Examples
    /// ```
    /// use riffweave_catalog::CellRole;
    ///
    /// assert_eq!(CellRole::Sus4Up5.derivation(), Some((CellRole::Sus4, 7)));
    /// assert_eq!(CellRole::Sus4Down4.derivation(), Some((CellRole::Sus4, -5)));
    /// assert_eq!(CellRole::Sus4.derivation(), None);
    /// ```
    pub fn derivation(self) -> Option<(CellRole, i32)> {
        let derived = match self {
            CellRole::Sus4Up2 => (CellRole::Sus4, 2),
            CellRole::Sus4Down2 => (CellRole::Sus4, -2),
            CellRole::Sus4Up5 => (CellRole::Sus4, 7),
            CellRole::Sus4Down5 => (CellRole::Sus4, -7),
            CellRole::Sus4Down4 => (CellRole::Sus4, -5),
            CellRole::MajorUp5 => (CellRole::Major, 7),
            CellRole::TwoDown2 => (CellRole::Two, -2),
            CellRole::MinorCDown2 => (CellRole::MinorC, -2),
            CellRole::MajorResolutionDown5 => (CellRole::MajorResolution, -7),
            CellRole::BaseMajorResolutionDown5 => (CellRole::MajorResolution, -7),
            _ => return None,
        };
        Some(derived)
    }

    /// True for roles that are authored rather than derived.
    pub fn is_base(self) -> bool {
        self.derivation().is_none()
    }
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CellRole {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRole::ALL
            .iter()
            .copied()
            .find(|role| role.name() == s)
            .ok_or_else(|| CatalogError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for role in CellRole::ALL {
            assert_eq!(role.name().parse::<CellRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_serde_name_matches_name() {
        for role in CellRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.name()));
        }
    }

    #[test]
    fn test_siblings_derive_from_base_roles() {
        for role in CellRole::ALL {
            if let Some((base, _)) = role.derivation() {
                assert!(base.is_base(), "{} derives from non-base {}", role, base);
            }
        }
    }

    #[test]
    fn test_unknown_role() {
        let err = "sus5".parse::<CellRole>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownRole(ref s) if s == "sus5"));
    }
}
