//! Chart-wide constants and default values
//!
//! This module centralizes the magic numbers of the control chart layout so the
//! configuration layer can expose them as overridable defaults.

/// Canvas and margin defaults (pixels)
pub mod canvas {
    /// Total canvas width
    pub const DEFAULT_WIDTH: f64 = 800.0;

    /// Total canvas height
    pub const DEFAULT_HEIGHT: f64 = 400.0;

    pub const MARGIN_TOP: f64 = 20.0;
    pub const MARGIN_RIGHT: f64 = 30.0;
    pub const MARGIN_BOTTOM: f64 = 100.0;
    pub const MARGIN_LEFT: f64 = 50.0;
}

/// Statistical Process Control (SPC) defaults
pub mod spc {
    /// Sigma multiplier for the control band (±1σ)
    pub const DEFAULT_SIGMA: f64 = 1.0;

    /// Minimum sample count for a sample standard deviation
    pub const MIN_DEVIATION_SAMPLES: usize = 2;
}

/// Scale and axis defaults
pub mod axis {
    /// Fixed padding added below min(y) and above max(y)
    pub const DEFAULT_DOMAIN_PADDING: f64 = 2.0;

    /// Lower bound of the x domain (sequence index origin)
    pub const DEFAULT_X_DOMAIN_START: f64 = 1.0;

    /// Tick count hint for the y axis
    pub const DEFAULT_Y_TICK_COUNT: usize = 10;

    /// Rotation applied to x tick labels (degrees)
    pub const X_LABEL_ROTATION: f64 = -90.0;

    pub const DEFAULT_X_NAME: &str = "x";
    pub const DEFAULT_Y_NAME: &str = "y";
}

/// Stroke defaults for the line roles
pub mod stroke {
    pub const WIDTH: f64 = 2.0;

    /// Dash pattern shared by goal, mean and control-limit lines
    pub const REFERENCE_DASH: [f64; 2] = [5.0, 5.0];

    /// Dash pattern of the trendline
    pub const TREND_DASH: [f64; 2] = [4.0, 4.0];
}

/// Default palette (CSS color names)
pub mod palette {
    pub const DATA: &str = "red";
    pub const GOAL: &str = "green";
    pub const MEAN: &str = "orange";
    pub const LIMITS: &str = "yellow";
    pub const TREND: &str = "blue";
}

/// Legend layout
pub mod legend {
    /// Swatch edge length
    pub const SWATCH_SIZE: f64 = 18.0;

    /// Vertical distance between consecutive rows
    pub const ROW_SPACING: f64 = 20.0;

    /// Distance from the plot's right edge to the right-anchored label
    pub const TEXT_INSET: f64 = 24.0;

    pub const GOAL_LABEL: &str = "Goal";
    pub const MEAN_LABEL: &str = "Mean";
    pub const LIMITS_LABEL: &str = "Control Limits";
    pub const TREND_LABEL: &str = "Trend Line";
}

/// Performance constants
pub mod performance {
    /// Maximum number of cached drawing plans
    pub const MAX_CACHED_PLANS: usize = 64;
}

/// Pareto chart layout
pub mod pareto {
    /// Bar fill and value axis
    pub const BAR_COLOR: &str = "#1f77b4";

    /// Cumulative line and percent axis
    pub const CUMULATIVE_COLOR: &str = "#ff7f0e";

    /// Fraction of each category band left empty around its bar
    pub const BAR_PADDING: f64 = 0.2;

    /// Upper bound of the cumulative percent axis
    pub const PERCENT_MAX: f64 = 100.0;

    pub const PERCENT_AXIS_LABEL: &str = "Cumulative %";
}
