use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Occupancy value of a site that has been entered an even number of times.
pub const UNVISITED: i8 = -1;
/// Occupancy value of a site that has been entered an odd number of times.
pub const VISITED: i8 = 1;

/// A lattice coordinate. `x` is the render row, `y` the render column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Site {
    pub x: usize,
    pub y: usize,
}

impl Site {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn parity_is_even(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl From<(usize, usize)> for Site {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

// Matches the tuple text the walk log has always used.
impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed occupancy grid plus per-site visit counters.
///
/// Every entry into a site increments its counter and negates its occupancy,
/// so `occupancy == VISITED` exactly when the counter is odd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    occupancy: Vec<i8>,
    visits: Vec<u32>,
}

impl Lattice {
    pub fn new(size: usize) -> Self {
        let n = size * size;
        Self {
            size,
            occupancy: vec![UNVISITED; n],
            visits: vec![0; n],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, `L * L`.
    pub fn sites(&self) -> usize {
        self.occupancy.len()
    }

    pub fn clear(&mut self) {
        self.occupancy.fill(UNVISITED);
        self.visits.fill(0);
    }

    pub fn contains(&self, site: Site) -> bool {
        site.x < self.size && site.y < self.size
    }

    fn idx(&self, site: Site) -> usize {
        site.x * self.size + site.y
    }

    pub fn occupancy(&self, site: Site) -> i8 {
        // Out-of-range reads behave like an untouched site.
        if !self.contains(site) {
            return UNVISITED;
        }
        self.occupancy[self.idx(site)]
    }

    pub fn visit_count(&self, site: Site) -> u32 {
        if !self.contains(site) {
            return 0;
        }
        self.visits[self.idx(site)]
    }

    /// Enters `site`: bumps its counter and flips its occupancy.
    ///
    /// Returns `true` when the site had already been entered before this call,
    /// i.e. the walk intersected itself.
    pub fn enter(&mut self, site: Site) -> bool {
        debug_assert!(self.contains(site), "enter() outside lattice: {site}");
        let i = self.idx(site);
        let intersected = self.visits[i] >= 1;
        self.occupancy[i] = -self.occupancy[i];
        self.visits[i] = self.visits[i].saturating_add(1);
        intersected
    }

    /// Signed sum of the occupancy grid (+1 per odd-visited site, -1 otherwise).
    pub fn occupancy_sum(&self) -> i64 {
        self.occupancy.iter().map(|&v| v as i64).sum()
    }

    /// Row-major occupancy values.
    pub fn occupancy_grid(&self) -> &[i8] {
        &self.occupancy
    }

    /// Row-major visit counters.
    pub fn visit_grid(&self) -> &[u32] {
        &self.visits
    }

    /// Moves `delta` cells along one axis, clamped to `[0, size)`.
    #[inline]
    pub fn clamp_axis(&self, coord: usize, delta: isize) -> usize {
        let last = self.size.saturating_sub(1);
        match delta {
            d if d < 0 => coord.saturating_sub(d.unsigned_abs()),
            d => coord.saturating_add(d as usize).min(last),
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "---".repeat(self.size);
        write!(f, "\r\n\t+{border}+\n")?;
        for row in self.occupancy.chunks(self.size.max(1)).take(self.size) {
            f.write_str("\t|")?;
            for &spin in row {
                f.write_str(if spin == VISITED { " o " } else { "   " })?;
            }
            f.write_str("|\n")?;
        }
        write!(f, "\t+{border}+\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lattice_is_unvisited() {
        let lat = Lattice::new(4);
        assert_eq!(lat.sites(), 16);
        assert!(lat.occupancy_grid().iter().all(|&v| v == UNVISITED));
        assert!(lat.visit_grid().iter().all(|&v| v == 0));
        assert_eq!(lat.occupancy_sum(), -16);
    }

    #[test]
    fn enter_flips_and_counts() {
        let mut lat = Lattice::new(3);
        let s = Site::new(1, 2);

        assert!(!lat.enter(s));
        assert_eq!(lat.occupancy(s), VISITED);
        assert_eq!(lat.visit_count(s), 1);

        // Second entry is an intersection and flips the site back.
        assert!(lat.enter(s));
        assert_eq!(lat.occupancy(s), UNVISITED);
        assert_eq!(lat.visit_count(s), 2);

        assert!(lat.enter(s));
        assert_eq!(lat.occupancy(s), VISITED);
        assert_eq!(lat.visit_count(s), 3);
    }

    #[test]
    fn occupancy_parity_tracks_visit_count() {
        let mut lat = Lattice::new(3);
        let path: [(usize, usize); 7] = [(0, 0), (0, 1), (0, 0), (1, 1), (0, 0), (2, 2), (1, 1)];
        for p in path {
            lat.enter(p.into());
        }
        for x in 0..3 {
            for y in 0..3 {
                let s = Site::new(x, y);
                let odd = lat.visit_count(s) % 2 == 1;
                assert_eq!(lat.occupancy(s) == VISITED, odd, "site {s}");
            }
        }
    }

    #[test]
    fn clamp_axis_stops_at_edges() {
        let lat = Lattice::new(4);
        assert_eq!(lat.clamp_axis(0, -1), 0);
        assert_eq!(lat.clamp_axis(3, 1), 3);
        assert_eq!(lat.clamp_axis(2, 1), 3);
        assert_eq!(lat.clamp_axis(2, -1), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut lat = Lattice::new(2);
        lat.enter(Site::new(0, 0));
        lat.enter(Site::new(1, 1));
        lat.clear();
        assert_eq!(lat, Lattice::new(2));
    }

    #[test]
    fn display_draws_bordered_box() {
        let mut lat = Lattice::new(2);
        lat.enter(Site::new(0, 1));
        let text = lat.to_string();
        assert_eq!(text, "\r\n\t+------+\n\t|    o |\n\t|      |\n\t+------+\n");
    }

    #[test]
    fn site_formats_as_tuple() {
        assert_eq!(Site::new(3, 14).to_string(), "(3, 14)");
    }
}
