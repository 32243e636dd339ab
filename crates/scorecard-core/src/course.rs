use serde::{Deserialize, Serialize};

/// Number of holes on a full round.
pub const HOLES_PER_ROUND: u8 = 18;

/// Last hole of the front nine.
pub const FRONT_NINE_LAST: u8 = 9;

/// A single hole of a course. Course data is read-only once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    /// Hole number, 1 to 18.
    pub number: u8,
    pub par: u8,
    /// Stroke index (1 = hardest). Only used to order handicap strokes.
    pub hc: u8,
}

impl Hole {
    pub const fn new(number: u8, par: u8, hc: u8) -> Self {
        Self { number, par, hc }
    }

    pub fn segment(&self) -> Segment {
        Segment::of(self.number)
    }
}

/// An 18-hole course definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub holes: Vec<Hole>,
}

impl Course {
    pub fn new(name: impl Into<String>, holes: Vec<Hole>) -> Self {
        Self {
            name: name.into(),
            holes,
        }
    }

    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.iter().find(|h| h.number == number)
    }

    /// Holes belonging to one nine, in course order.
    pub fn segment(&self, segment: Segment) -> Vec<Hole> {
        self.holes
            .iter()
            .filter(|h| h.segment() == segment)
            .copied()
            .collect()
    }

    pub fn front_nine(&self) -> Vec<Hole> {
        self.segment(Segment::Front9)
    }

    pub fn back_nine(&self) -> Vec<Hole> {
        self.segment(Segment::Back9)
    }

    pub fn par_total(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }
}

/// One half of the round. Handicap strokes are owed and allocated per nine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Front9,
    Back9,
}

impl Segment {
    pub const ALL: [Segment; 2] = [Segment::Front9, Segment::Back9];

    pub fn of(hole: u8) -> Self {
        if hole <= FRONT_NINE_LAST {
            Self::Front9
        } else {
            Self::Back9
        }
    }
}
