//! Mapping from data space to pixel space.
//!
//! A [`Domain`] is the padded value range of one axis, computed from every
//! point of every series. A [`PlotArea`] is the chart canvas minus fixed
//! margins. Together they place data values on screen:
//!
//! ```text
//!   x_px = 60 + (x - x_min) / (x_max - x_min) * (width - 120)
//!   y_px = height - 40 - (y - y_min) / (y_max - y_min) * (height - 80)
//! ```
//!
//! The Y axis is inverted since SVG grows downward.

use tessera_core::{
    draw::format_value,
    geometry::{Insets, Point},
    semantic::Series,
};

/// Left and right margin of the plot area.
pub const MARGIN_X: f64 = 60.0;

/// Top and bottom margin of the plot area.
pub const MARGIN_Y: f64 = 40.0;

/// Number of tick intervals per axis; each axis gets one more tick than this.
pub const TICK_DIVISIONS: usize = 5;

const PADDING_RATIO: f64 = 0.1;
const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;

/// A closed value interval along one axis.
///
/// # Examples
///
/// ```
/// # use tessera::scale::Domain;
/// // [10, 20] widened by 10% of the range at both ends
/// let domain = Domain::from_values([10.0, 20.0, 15.0]);
/// assert_eq!(domain.min(), 9.0);
/// assert_eq!(domain.max(), 21.0);
///
/// // A single value is widened to [v - 1, v + 1] before padding
/// let domain = Domain::from_values([5.0]);
/// assert!((domain.min() - 3.8).abs() < 1e-9);
/// assert!((domain.max() - 6.2).abs() < 1e-9);
///
/// // Nothing to measure
/// assert_eq!(Domain::from_values(Vec::<f64>::new()), Domain::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl Domain {
    /// Creates a domain from raw bounds, without padding.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Computes the padded domain of `values`.
    ///
    /// Falls back to `[0, 100]` when `values` is empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let extent = values.into_iter().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(min, max)| (min.min(v), max.max(v))))
        });

        let Some((mut min, mut max)) = extent else {
            return Self::default();
        };

        if min == max {
            min -= 1.0;
            max += 1.0;
        }

        let padding = (max - min) * PADDING_RATIO;
        Self {
            min: min - padding,
            max: max + padding,
        }
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if the domain maps values to finite positions.
    ///
    /// Data near `f64::MAX` in magnitude can overflow the span while
    /// padding, which leaves bounds at infinity.
    pub fn is_finite(self) -> bool {
        let span = self.span();
        span.is_finite() && span > 0.0
    }

    /// Position of `value` within the domain, 0 at `min` and 1 at `max`.
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// `divisions + 1` values evenly spaced from `min` to `max`.
    pub fn ticks(self, divisions: usize) -> Vec<f64> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.span().mul_add(i as f64 / divisions as f64, self.min))
            .collect()
    }

    /// Tick labels for [`ticks`](Self::ticks), one decimal place each.
    pub fn tick_labels(self, divisions: usize) -> Vec<String> {
        self.ticks(divisions).into_iter().map(format_value).collect()
    }
}

/// X and Y domains of a set of series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataExtent {
    x: Domain,
    y: Domain,
}

impl DataExtent {
    /// Measures all points of all `series`, each axis independently.
    pub fn from_series(series: &[Series]) -> Self {
        let points = || series.iter().flat_map(Series::points);
        Self {
            x: Domain::from_values(points().map(|p| p.x())),
            y: Domain::from_values(points().map(|p| p.y())),
        }
    }

    pub fn x(&self) -> Domain {
        self.x
    }

    pub fn y(&self) -> Domain {
        self.y
    }

    /// First axis whose domain is not finite, if any.
    pub fn non_finite_axis(&self) -> Option<&'static str> {
        [("x", self.x), ("y", self.y)]
            .into_iter()
            .find(|(_, domain)| !domain.is_finite())
            .map(|(axis, _)| axis)
    }
}

/// The chart canvas and the plotting rectangle inside its margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    width: f64,
    height: f64,
    margins: Insets,
}

impl PlotArea {
    /// Plot area of a `width` x `height` canvas with the standard margins.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Insets::symmetric(MARGIN_Y, MARGIN_X),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn left(&self) -> f64 {
        self.margins.left()
    }

    pub fn right(&self) -> f64 {
        self.width - self.margins.right()
    }

    pub fn top(&self) -> f64 {
        self.margins.top()
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margins.bottom()
    }

    /// Horizontal extent available for data.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margins.horizontal_sum()
    }

    /// Vertical extent available for data.
    pub fn plot_height(&self) -> f64 {
        self.height - self.margins.vertical_sum()
    }

    pub fn scale_x(&self, domain: Domain, value: f64) -> f64 {
        domain.normalize(value).mul_add(self.plot_width(), self.left())
    }

    pub fn scale_y(&self, domain: Domain, value: f64) -> f64 {
        self.bottom() - domain.normalize(value) * self.plot_height()
    }

    /// Scales a data point on both axes.
    pub fn scale(&self, extent: &DataExtent, x: f64, y: f64) -> Point {
        Point::new(self.scale_x(extent.x(), x), self.scale_y(extent.y(), y))
    }

    /// Pixel x of the `i`-th of `divisions` equal intervals, `0..=divisions`.
    pub fn tick_x(&self, i: usize, divisions: usize) -> f64 {
        self.left() + self.plot_width() * i as f64 / divisions as f64
    }

    /// Pixel y of the `i`-th of `divisions` equal intervals, counted from the bottom.
    pub fn tick_y(&self, i: usize, divisions: usize) -> f64 {
        self.bottom() - self.plot_height() * i as f64 / divisions as f64
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use tessera_core::semantic::{DataPoint, Series};

    use super::*;

    #[test]
    fn test_domain_padding() {
        let domain = Domain::from_values([78.0, 156.0]);
        assert!(approx_eq!(f64, domain.min(), 70.2, epsilon = 1e-9));
        assert!(approx_eq!(f64, domain.max(), 163.8, epsilon = 1e-9));
    }

    #[test]
    fn test_domain_degenerate_range_widened() {
        let domain = Domain::from_values([0.0, 0.0]);
        assert!(approx_eq!(f64, domain.min(), -1.2, epsilon = 1e-9));
        assert!(approx_eq!(f64, domain.max(), 1.2, epsilon = 1e-9));
    }

    #[test]
    fn test_ticks() {
        let domain = Domain::new(0.0, 100.0);
        assert_eq!(domain.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(
            domain.tick_labels(5),
            vec!["0.0", "20.0", "40.0", "60.0", "80.0", "100.0"]
        );
    }

    #[test]
    fn test_data_extent_empty_series_default() {
        let extent = DataExtent::from_series(&[Series::new("empty")]);
        assert_eq!(extent.x(), Domain::default());
        assert_eq!(extent.y(), Domain::default());
    }

    #[test]
    fn test_data_extent_axes_independent() {
        let series = [
            Series::new("a").with_points([DataPoint::new(0.0, 10.0), DataPoint::new(4.0, 20.0)]),
            Series::new("b").with_point(DataPoint::new(2.0, 30.0)),
        ];
        let extent = DataExtent::from_series(&series);
        assert!(approx_eq!(f64, extent.x().min(), -0.4, epsilon = 1e-9));
        assert!(approx_eq!(f64, extent.x().max(), 4.4, epsilon = 1e-9));
        assert!(approx_eq!(f64, extent.y().min(), 8.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, extent.y().max(), 32.0, epsilon = 1e-9));
    }

    #[test]
    fn test_plot_area_scaling() {
        let area = PlotArea::new(400.0, 300.0);
        let domain = Domain::new(0.0, 100.0);

        assert_eq!(area.plot_width(), 280.0);
        assert_eq!(area.plot_height(), 220.0);
        assert_eq!(area.scale_x(domain, 0.0), 60.0);
        assert_eq!(area.scale_x(domain, 100.0), 340.0);
        assert_eq!(area.scale_y(domain, 0.0), 260.0);
        assert_eq!(area.scale_y(domain, 100.0), 40.0);
        assert_eq!(area.tick_y(5, 5), 40.0);
        assert_eq!(area.tick_x(0, 5), 60.0);
    }

    proptest! {
        #[test]
        fn prop_domain_contains_all_values(values in prop::collection::vec(-1e6f64..1e6, 1..50)) {
            let domain = Domain::from_values(values.iter().copied());
            prop_assert!(domain.min() < domain.max());
            for v in values {
                prop_assert!(domain.min() <= v && v <= domain.max());
            }
        }

        #[test]
        fn prop_scaled_values_stay_inside_plot(values in prop::collection::vec(-1e6f64..1e6, 1..50)) {
            let domain = Domain::from_values(values.iter().copied());
            let area = PlotArea::new(500.0, 300.0);
            for v in values {
                let x = area.scale_x(domain, v);
                let y = area.scale_y(domain, v);
                prop_assert!(area.left() - 1e-6 <= x && x <= area.right() + 1e-6);
                prop_assert!(area.top() - 1e-6 <= y && y <= area.bottom() + 1e-6);
            }
        }

        #[test]
        fn prop_scale_is_monotonic(a in -1e3f64..1e3, b in -1e3f64..1e3) {
            let domain = Domain::from_values([a, b]);
            let area = PlotArea::new(400.0, 300.0);
            if a < b {
                prop_assert!(area.scale_x(domain, a) < area.scale_x(domain, b));
                prop_assert!(area.scale_y(domain, a) > area.scale_y(domain, b));
            }
        }
    }
}
