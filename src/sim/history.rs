use std::collections::VecDeque;

/// Sliding window of past angle pairs, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    angle1: VecDeque<f64>,
    angle2: VecDeque<f64>,
    max_points: usize,
}

impl HistoryBuffer {
    pub fn new(max_points: usize) -> Self {
        Self {
            angle1: VecDeque::with_capacity(max_points + 1),
            angle2: VecDeque::with_capacity(max_points + 1),
            max_points,
        }
    }

    /// Add a new sample pair
    pub fn push(&mut self, angle1: f64, angle2: f64) {
        self.angle1.push_back(angle1);
        self.angle2.push_back(angle2);

        // Remove old points, both series in lockstep
        if self.angle1.len() > self.max_points {
            self.angle1.pop_front();
            self.angle2.pop_front();
        }
    }

    /// `(index, angle1, angle2)` with index 0 being the oldest sample.
    pub fn samples(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.angle1
            .iter()
            .zip(self.angle2.iter())
            .enumerate()
            .map(|(i, (&a1, &a2))| (i, a1, a2))
    }

    pub fn latest(&self) -> Option<(f64, f64)> {
        Some((*self.angle1.back()?, *self.angle2.back()?))
    }

    pub fn len(&self) -> usize {
        self.angle1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angle1.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_points
    }
}
