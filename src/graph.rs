use crate::{interpolate::map, GraphHistory};
use heapless::Vec;

/// A point in display coordinates, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Placement and vertical scaling of the scrolling graph.
///
/// - `x`: Left edge of the plot area
/// - `baseline_y`: Row of the x axis; values are drawn above it
/// - `width`: Width of the plot area
/// - `height`: Height of the plot area
/// - `bounds`: Optional `(floor, ceiling)` the vertical extent always covers
///
/// # Examples
///
/// ```
/// use hall_sampler::{GraphHistory, GraphLayout, Point};
///
/// let layout = GraphLayout {
///     x: 0,
///     baseline_y: 100,
///     width: 40,
///     height: 50,
///     bounds: None,
/// };
///
/// let mut history = GraphHistory::<4>::new();
/// history.push(1000);
///
/// let points = layout.polyline(&history);
/// assert_eq!(points[0], Point { x: 0, y: 100 });
/// assert_eq!(points[3], Point { x: 30, y: 50 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GraphLayout {
    pub x: i32,
    pub baseline_y: i32,
    pub width: i32,
    pub height: i32,
    pub bounds: Option<(u16, u16)>,
}

impl GraphLayout {
    /// Vertical extent `(lo, hi)` used to scale `history`.
    pub fn extent<const N: usize>(&self, history: &GraphHistory<N>) -> (u16, u16) {
        let (lo, hi) = history.extent();

        match self.bounds {
            Some((floor, ceiling)) => (lo.min(floor), hi.max(ceiling)),
            None => (lo, hi),
        }
    }

    /// Points of the polyline for `history`, oldest on the left.
    ///
    /// Consecutive points are `width / N` apart. The lowest value of the
    /// extent lands on the baseline and the highest `height` above it. A
    /// flat extent draws every point on the baseline.
    pub fn polyline<const N: usize>(&self, history: &GraphHistory<N>) -> Vec<Point, N> {
        let (lo, hi) = self.extent(history);
        let step = self.width / N.max(1) as i32;

        history
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let rise = if lo == hi {
                    0
                } else {
                    map(value.into(), lo.into(), hi.into(), 0, self.height)
                };

                Point {
                    x: self.x + index as i32 * step,
                    y: self.baseline_y - rise,
                }
            })
            .collect()
    }
}

impl Default for GraphLayout {
    /// The layout of a 170 px wide portrait screen, scaled between the
    /// sensor's no-field reading and the ADC's full scale.
    fn default() -> Self {
        Self {
            x: 5,
            baseline_y: 200,
            width: 150,
            height: 55,
            bounds: Some((30, 4095)),
        }
    }
}
