// ── Device status summary ──

use serde::Serialize;

/// Device health split shown in the dashboard pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    pub normal: u64,
    pub replacement: u64,
    pub error: u64,
}

impl DeviceStatus {
    /// Slice labels, in series order.
    pub const LABELS: [&'static str; 3] = ["normal", "replacement", "error"];

    /// Sum of all slices, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.normal
            .saturating_add(self.replacement)
            .saturating_add(self.error)
    }

    /// `(label, count)` pairs in chart order.
    pub fn series(&self) -> [(&'static str, u64); 3] {
        [
            (Self::LABELS[0], self.normal),
            (Self::LABELS[1], self.replacement),
            (Self::LABELS[2], self.error),
        ]
    }

    /// Percentage of the total for each slice; all zero when there are no devices.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn shares(&self) -> [f64; 3] {
        let total = self.total();
        if total == 0 {
            return [0.0; 3];
        }
        let pct = |n: u64| n as f64 * 100.0 / total as f64;
        [pct(self.normal), pct(self.replacement), pct(self.error)]
    }
}
