use std::collections::VecDeque;

/// Glidende snitt over de siste N rå verdiene for én kanal.
/// Streng FIFO; før bufferet er fullt brukes bare verdiene som finnes (ingen null-padding).
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    buf: VecDeque<f64>,
    capacity: usize,
}

impl MovingAverage {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Legg til en rå verdi og returnér nytt snitt.
    pub fn push(&mut self, x: f64) -> f64 {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(x);
        self.mean().unwrap_or(x)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.buf.is_empty() {
            return None;
        }
        Some(self.buf.iter().sum::<f64>() / self.buf.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
