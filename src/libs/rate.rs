use serde::Serialize;

/// Present/total counts for some slice of the attendance table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceTally {
    pub total: i64,
    pub present: i64,
}

impl AttendanceTally {
    /// Percentage of marks that are Present; 0 when nothing was marked.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.present as f64 / self.total as f64 * 100.0
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
