use crate::dataset::HealthStatus;

/// Health above this is labelled Healthy upstream.
pub const HEALTHY_ABOVE: f64 = 85.0;

/// Health below this is labelled Critical upstream.
pub const CRITICAL_BELOW: f64 = 70.0;

/// Band a battery-health percentage falls into under the upstream rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    Healthy,
    Moderate,
    Critical,
}

/// | Range        | Band     |
/// |--------------|----------|
/// | > 85         | Healthy  |
/// | 70 ..= 85    | Moderate |
/// | < 70         | Critical |
pub fn classify(health: f64) -> StatusBand {
    match health {
        h if h > HEALTHY_ABOVE => StatusBand::Healthy,
        h if h < CRITICAL_BELOW => StatusBand::Critical,
        _ => StatusBand::Moderate,
    }
}

/// Whether a recorded label agrees with the band its health value falls into.
/// Any label other than Healthy or Critical is accepted for the middle band.
pub fn is_consistent(status: &HealthStatus, health: f64) -> bool {
    matches!(
        (status, classify(health)),
        (HealthStatus::Healthy, StatusBand::Healthy)
            | (HealthStatus::Critical, StatusBand::Critical)
            | (HealthStatus::Other(_), StatusBand::Moderate)
    )
}
