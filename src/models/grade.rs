//! Letter grades and exact GPA arithmetic.
//!
//! The grade vocabulary is closed: twelve symbols with fixed point values,
//! ordered by academic rank. Anything outside the table is rejected at
//! ingestion. GPA math stays in integer hundredths end to end so the
//! round-half-up display contract holds exactly (no binary float drift).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grade point values in hundredths of a point (A = 4.00 -> 400).
const POINT_SCALE: u32 = 100;

/// A letter grade from the fixed academic vocabulary.
///
/// Variants are declared in rank order. A grade passes when its value is
/// at least that of the minimum passing grade, fixed at C (2.00); C- and
/// below carry zero points and never pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

/// Minimum passing grade.
pub const PASSING_GRADE: LetterGrade = LetterGrade::C;

impl LetterGrade {
    /// Parse a grade symbol. Returns `None` for anything outside the
    /// value table (including "A+", which some sources emit).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "A" => Some(Self::A),
            "A-" => Some(Self::AMinus),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "B-" => Some(Self::BMinus),
            "C+" => Some(Self::CPlus),
            "C" => Some(Self::C),
            "C-" => Some(Self::CMinus),
            "D+" => Some(Self::DPlus),
            "D" => Some(Self::D),
            "D-" => Some(Self::DMinus),
            "F" => Some(Self::F),
            _ => None,
        }
    }

    /// The grade symbol as written in source files.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        }
    }

    /// Point value in hundredths (A = 400, A- = 375, ... C = 200, below C = 0).
    pub fn points(&self) -> u32 {
        match self {
            Self::A => 400,
            Self::AMinus => 375,
            Self::BPlus => 325,
            Self::B => 300,
            Self::BMinus => 275,
            Self::CPlus => 225,
            Self::C => 200,
            Self::CMinus | Self::DPlus | Self::D | Self::DMinus | Self::F => 0,
        }
    }

    /// Whether this grade counts toward course completion.
    pub fn is_passing(&self) -> bool {
        self.points() >= PASSING_GRADE.points()
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// GPA
// =============================================================================

/// A grade point average as an exact rational: total points in hundredths
/// over the number of distinct courses contributing.
///
/// Kept unreduced so rounding happens exactly once, at display time.
#[derive(Debug, Clone, Copy)]
pub struct Gpa {
    total_points: u32,
    courses: u32,
}

impl Gpa {
    /// GPA of a student with no passed courses: exactly 0.00.
    pub const ZERO: Gpa = Gpa {
        total_points: 0,
        courses: 0,
    };

    /// Average the given per-course point values (hundredths).
    pub fn from_points(points: impl IntoIterator<Item = u32>) -> Self {
        let mut gpa = Self::ZERO;
        for value in points {
            gpa.total_points += value;
            gpa.courses += 1;
        }
        gpa
    }

    /// The average rounded half-up to integer hundredths.
    pub fn rounded_hundredths(&self) -> u32 {
        if self.courses == 0 {
            return 0;
        }
        // round-half-up(a / b) for non-negative a is (2a + b) / 2b.
        (2 * self.total_points + self.courses) / (2 * self.courses)
    }

    /// Render the rounded average, then drop exactly one trailing zero:
    /// "3.80" becomes "3.8" and "3.00" becomes "3.0", but "3.44" and an
    /// already-stripped "3.8" are left alone.
    pub fn display(&self) -> String {
        let hundredths = self.rounded_hundredths();
        let mut rendered = format!("{}.{:02}", hundredths / POINT_SCALE, hundredths % POINT_SCALE);
        if rendered.ends_with('0') {
            rendered.pop();
        }
        rendered
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
