//! ColorBrewer Set2 line colors.

use tracing::warn;

const SET2: [&str; 8] = [
    "rgb(102,194,165)",
    "rgb(252,141,98)",
    "rgb(141,160,203)",
    "rgb(231,138,195)",
    "rgb(166,216,84)",
    "rgb(255,217,47)",
    "rgb(229,196,148)",
    "rgb(179,179,179)",
];

/// Colors for `n` metrics.
///
/// Two metrics take the first and third colors for contrast. Past eight
/// metrics the palette repeats.
pub fn color_map(n: usize) -> Vec<&'static str> {
    if n == 2 {
        return vec![SET2[0], SET2[2]];
    }
    if n > SET2.len() {
        warn!(metrics = n, "too many metrics, cycling through the palette");
    }
    SET2.iter().copied().cycle().take(n).collect()
}
