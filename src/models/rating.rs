/// Running totals of the scores one laptop has received.
///
/// The average is derived from `sum / count` on demand and never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rating {
    pub count: u32,
    pub sum: f64,
}

impl Rating {
    pub fn add(&mut self, score: f64) {
        self.count += 1;
        self.sum += score;
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / f64::from(self.count)
    }
}
