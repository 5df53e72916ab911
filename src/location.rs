use serde::*;

/// A cell on the arena grid.
///
/// Coordinates are signed so that offsets computed behind a breach (or off
/// the edge of the arena) stay representable; the engine decides whether a
/// cell is actually occupiable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.y
    }

    /// The cell shifted by the given row/column delta.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Location {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Straight-line distance, as used by structure attack ranges.
    pub fn distance_to(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;

        (dx * dx + dy * dy).sqrt()
    }

    /// The four orthogonal neighbours (units move orthogonally).
    pub fn neighbours(self) -> [Location; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl From<[i32; 2]> for Location {
    fn from(pair: [i32; 2]) -> Self {
        Location::new(pair[0], pair[1])
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Location::new(x, y)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Locations travel on the wire as `[x, y]` pairs.
impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[i32; 2]>::deserialize(deserializer).map(Location::from)
    }
}

/// Sort a list of cells by descending row, keeping the input order within a
/// row.
pub fn by_descending_row(locations: &[Location]) -> Vec<Location> {
    use itertools::Itertools;

    locations
        .iter()
        .copied()
        .sorted_by_key(|loc| std::cmp::Reverse(loc.y()))
        .collect()
}
