//! Contracts for the display side of the pipeline.
//!
//! Drawing is left to the board. The samplers only hand over values and
//! never observe what the renderer does with them.

use crate::{GraphHistory, MeterZones};

/// Redraws the scrolling graph.
pub trait GraphRenderer<const N: usize> {
    /// Draws `current` as the numeric readout and `history` as a polyline.
    ///
    /// Only called when `current` differs from the previously rendered
    /// value. `history` already ends with `current`.
    fn render_graph(&mut self, current: u16, history: &GraphHistory<N>);
}

/// Moves the needle of an analog meter.
pub trait MeterRenderer {
    /// Places the needle at `voltage` on the scale described by `zones`.
    fn render_meter(&mut self, voltage: f32, zones: &MeterZones);
}
