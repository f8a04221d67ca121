use serde::Serialize;
use std::fmt;

/// The fixed stages a student passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    Preparatory,
    Grade1,
    Grade2,
    Grade3,
    Grade4,
}

impl Stage {
    pub const ALL: [Stage; 5] = [Stage::Preparatory, Stage::Grade1, Stage::Grade2, Stage::Grade3, Stage::Grade4];

    pub const GRADES: [Stage; 4] = [Stage::Grade1, Stage::Grade2, Stage::Grade3, Stage::Grade4];

    /// Grade number 1..=4, `None` for the preparatory stage.
    pub fn grade(self) -> Option<u8> {
        match self {
            Stage::Preparatory => None,
            Stage::Grade1 => Some(1),
            Stage::Grade2 => Some(2),
            Stage::Grade3 => Some(3),
            Stage::Grade4 => Some(4),
        }
    }

    /// The odd semester that stands in for a whole grade when looking up
    /// weekly hours: grade g maps to semester 2g - 1.
    pub fn representative_semester(self) -> Option<u8> {
        self.grade().map(|g| 2 * g - 1)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.grade() {
            Some(g) => write!(f, "Grade {}", g),
            None => write!(f, "Preparatory"),
        }
    }
}

/// Students per stage for one department in one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Headcount {
    pub preparatory: u32,
    pub grade1: u32,
    pub grade2: u32,
    pub grade3: u32,
    pub grade4: u32,
}

impl Headcount {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Preparatory => self.preparatory,
            Stage::Grade1 => self.grade1,
            Stage::Grade2 => self.grade2,
            Stage::Grade3 => self.grade3,
            Stage::Grade4 => self.grade4,
        }
    }

    pub fn total(&self) -> u64 {
        Stage::ALL.iter().map(|stage| self.get(*stage) as u64).sum()
    }

    /// Ages this cohort by one year.
    ///
    /// `stays_in_prep` and `direct_to_grade1` are the fractional shares of this
    /// year's intake. Grade 1 receives the direct admits plus everyone who was in
    /// preparatory last year; every other grade moves up unchanged and Grade 4
    /// leaves the model. `None` if a new count does not fit a `u32`.
    pub fn advance(&self, stays_in_prep: f64, direct_to_grade1: f64) -> Option<Headcount> {
        Some(Headcount {
            preparatory: round_count(stays_in_prep)?,
            grade1: round_count(direct_to_grade1 + self.preparatory as f64)?,
            grade2: self.grade1,
            grade3: self.grade2,
            grade4: self.grade3,
        })
    }
}

/// Rounds half to even, with negative values counting as zero. `None` when
/// the result exceeds `u32::MAX`.
pub fn round_count(value: f64) -> Option<u32> {
    let rounded = value.round_ties_even();
    if rounded <= 0.0 {
        Some(0)
    } else if rounded > u32::MAX as f64 {
        None
    } else {
        Some(rounded as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_semesters_are_odd() {
        let semesters: Vec<u8> = Stage::GRADES.iter().filter_map(|s| s.representative_semester()).collect();
        assert_eq!(semesters, vec![1, 3, 5, 7]);
        assert_eq!(Stage::Preparatory.representative_semester(), None);
    }

    #[test]
    fn test_round_count_is_half_even() {
        assert_eq!(round_count(2.5), Some(2));
        assert_eq!(round_count(3.5), Some(4));
        assert_eq!(round_count(4.4), Some(4));
        assert_eq!(round_count(-0.4), Some(0));
    }

    #[test]
    fn test_round_count_rejects_values_beyond_u32() {
        assert_eq!(round_count(u32::MAX as f64), Some(u32::MAX));
        assert_eq!(round_count(u32::MAX as f64 + 1.0), None);
    }

    #[test]
    fn test_advance_promotes_every_grade() {
        let current = Headcount { preparatory: 46, grade1: 32, grade2: 7, grade3: 1, grade4: 9 };
        let next = current.advance(54.0, 6.0).unwrap();

        assert_eq!(next.preparatory, 54);
        assert_eq!(next.grade1, 52);
        assert_eq!(next.grade2, 32);
        assert_eq!(next.grade3, 7);
        assert_eq!(next.grade4, 1);
    }

    #[test]
    fn test_advance_overflowing_grade1_is_none() {
        let current = Headcount { preparatory: u32::MAX, ..Headcount::zero() };
        assert_eq!(current.advance(0.0, 1.0), None);
    }

    #[test]
    fn test_total_sums_all_stages() {
        let headcount = Headcount { preparatory: 1, grade1: 2, grade2: 3, grade3: 4, grade4: 5 };
        assert_eq!(headcount.total(), 15);

        let full = Headcount { preparatory: u32::MAX, grade1: u32::MAX, grade2: u32::MAX, grade3: u32::MAX, grade4: u32::MAX };
        assert_eq!(full.total(), 5 * u32::MAX as u64);
    }
}
