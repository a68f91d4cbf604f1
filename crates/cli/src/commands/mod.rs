pub(crate) mod dashboard;
pub(crate) mod insights;
pub(crate) mod map;
pub(crate) mod nodes;
pub(crate) mod reality;
pub(crate) mod settings;
pub(crate) mod signals;
pub(crate) mod simulate;
pub(crate) mod sources;

/// Gravity rendered with one decimal, the way every table shows it.
pub(crate) fn gravity(score: f64) -> String {
    format!("{:.1}", score)
}

/// Confidence in `[0, 1]` rendered as a whole percentage. Halves round away
/// from zero.
pub(crate) fn percent(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round())
}
