use std::collections::VecDeque;

/// Fixed-capacity window of the most recent samples with a running sum.
pub struct MovingWindow {
    capacity: usize,
    data: VecDeque<f64>,
    sum: f64,
}

impl MovingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            data: VecDeque::with_capacity(capacity),
            sum: 0.0,
        }
    }

    /// Appends `value`, evicting the oldest sample once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.data.len() == self.capacity {
            if let Some(oldest) = self.data.pop_front() {
                self.sum -= oldest;
            }
        }
        self.data.push_back(value);
        self.sum += value;
    }

    /// Mean of the buffered samples. An empty window yields NaN (0/0).
    pub fn average(&self) -> f64 {
        self.sum / self.data.len() as f64
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
