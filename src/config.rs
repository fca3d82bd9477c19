//! Configuration management for the layout engine

/// Geometric constants shared by every layout strategy
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal padding kept clear on both canvas edges
    pub padding_x: f64,

    /// Space reserved above the topmost row
    pub padding_top: f64,

    /// Space reserved below the yearless strip
    pub padding_bottom: f64,

    /// Height of the bottom strip holding nodes without a year
    pub yearless_strip_height: f64,

    /// Preferred horizontal gap between nodes sharing a year inside one band
    pub fan_spacing: f64,

    /// Distance kept between a node and its band's edges
    pub band_margin: f64,

    /// Upper bound of the horizontal jitter in banded natural mode
    pub natural_jitter: f64,

    /// Upper bound of the horizontal offset in unclustered chronological mode
    pub chronological_offset: f64,

    /// Radius step between consecutive rings of the radial search
    pub ring_step: f64,

    /// Number of rings tried before falling back
    pub max_rings: usize,

    /// Angular slots tried on each ring
    pub angular_slots: usize,

    /// Minimum distance between two radially placed nodes
    pub min_separation: f64,

    /// Margin the radial search keeps from the canvas border
    pub canvas_margin: f64,

    /// Radius of the even angular fallback
    pub fallback_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_x: 40.0,
            padding_top: 60.0,
            padding_bottom: 30.0,
            yearless_strip_height: 50.0,
            fan_spacing: 40.0,
            band_margin: 10.0,
            natural_jitter: 20.0,
            chronological_offset: 60.0,
            ring_step: 70.0,
            max_rings: 8,
            angular_slots: 12,
            min_separation: 60.0,
            canvas_margin: 30.0,
            fallback_radius: 200.0,
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with custom paddings, keeping the remaining defaults
    pub fn new(padding_x: f64, padding_top: f64, padding_bottom: f64) -> Self {
        Self {
            padding_x,
            padding_top,
            padding_bottom,
            ..Self::default()
        }
    }

    /// Top of the shared vertical year scale, never below the upper quarter
    pub fn scale_top(&self, height: f64) -> f64 {
        self.padding_top.min(height / 4.0)
    }

    /// Bottom of the shared vertical year scale, just above the yearless strip.
    /// Short canvases fall back to the third quarter of the height.
    pub fn scale_bottom(&self, height: f64) -> f64 {
        (height - self.padding_bottom - self.yearless_strip_height).max(height * 0.75)
    }

    /// Vertical center of the yearless strip, always below the year scale
    pub fn strip_y(&self, height: f64) -> f64 {
        let y = height - self.padding_bottom - self.yearless_strip_height / 2.0;
        y.max(height * 0.875).clamp(0.0, height)
    }
}
