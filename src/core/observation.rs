use crate::lattice::Lattice;

/// Number of stacked frames in every observation.
pub const FRAME_DEPTH: usize = 4;

/// An `L x L x 4` channel-last tensor.
///
/// There is no frame history: every channel holds the same copy of the
/// current occupancy grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    size: usize,
    data: Vec<f32>,
}

impl Observation {
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let size = lattice.size();
        let mut data = Vec::with_capacity(lattice.sites() * FRAME_DEPTH);
        for &v in lattice.occupancy_grid() {
            let v = v as f32;
            data.extend_from_slice(&[v; FRAME_DEPTH]);
        }
        Self { size, data }
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.size, self.size, FRAME_DEPTH]
    }

    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<f32> {
        if x >= self.size || y >= self.size || channel >= FRAME_DEPTH {
            return None;
        }
        self.data
            .get((x * self.size + y) * FRAME_DEPTH + channel)
            .copied()
    }

    /// One `L x L` frame, row-major.
    pub fn channel(&self, channel: usize) -> Vec<f32> {
        if channel >= FRAME_DEPTH {
            return Vec::new();
        }
        self.data
            .iter()
            .skip(channel)
            .step_by(FRAME_DEPTH)
            .copied()
            .collect()
    }

    /// Flat channel-last buffer, suitable for handing to a tensor library.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}
