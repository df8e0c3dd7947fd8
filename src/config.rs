//! Locator tuning parameters.

use crate::error::LocateError;

/// Which side of the adaptive threshold becomes foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Pixels at or below `local mean - C` are foreground.
    #[default]
    DarkForeground,
    /// Pixels above `local mean - C` are foreground.
    LightForeground,
}

/// Default adaptive threshold window side.
pub const DEFAULT_BLOCK_SIZE: u32 = 35;
/// Default threshold offset.
pub const DEFAULT_C: f32 = 16.0;
/// Default closing element side.
pub const DEFAULT_CLOSE_SIZE: u32 = 2;
/// Default polygon simplification tolerance, in pixels.
pub const DEFAULT_SIMPLIFY_EPSILON: f32 = 6.0;

/// Parameters for [`crate::locate_with_params`] and [`crate::Locator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorParams {
    /// Adaptive threshold neighbourhood side (odd, > 1)
    pub block_size: u32,
    /// Offset subtracted from the local mean
    pub c: f32,
    /// Side of the square closing element (>= 1)
    pub close_size: u32,
    /// Contour simplification tolerance
    pub simplify_epsilon: f32,
    /// Threshold polarity
    pub polarity: Polarity,
    /// Classify contours on the rayon pool
    pub parallel: bool,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            c: DEFAULT_C,
            close_size: DEFAULT_CLOSE_SIZE,
            simplify_epsilon: DEFAULT_SIMPLIFY_EPSILON,
            polarity: Polarity::DarkForeground,
            parallel: true,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_env_bool_u8(name: &str) -> Option<bool> {
    parse_env::<u8>(name).map(|v| v != 0)
}

impl LocatorParams {
    /// Parameters for the three primary tuning values, other fields default
    pub fn new(block_size: u32, c: f32, close_size: u32) -> Self {
        Self {
            block_size,
            c,
            close_size,
            ..Self::default()
        }
    }

    /// Defaults overlaid with `DM_BLOCK_SIZE`, `DM_C`, `DM_CLOSE_SIZE`,
    /// `DM_SIMPLIFY_EPSILON` and `DM_PARALLEL` (0/1). Unparsable values are
    /// ignored.
    pub fn from_env() -> Self {
        let mut params = Self::default();
        if let Some(v) = parse_env("DM_BLOCK_SIZE") {
            params.block_size = v;
        }
        if let Some(v) = parse_env("DM_C") {
            params.c = v;
        }
        if let Some(v) = parse_env("DM_CLOSE_SIZE") {
            params.close_size = v;
        }
        if let Some(v) = parse_env("DM_SIMPLIFY_EPSILON") {
            params.simplify_epsilon = v;
        }
        if let Some(v) = parse_env_bool_u8("DM_PARALLEL") {
            params.parallel = v;
        }
        params
    }

    /// Set the adaptive threshold window side
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the threshold offset
    pub fn with_c(mut self, c: f32) -> Self {
        self.c = c;
        self
    }

    /// Set the closing element side
    pub fn with_close_size(mut self, close_size: u32) -> Self {
        self.close_size = close_size;
        self
    }

    /// Set the contour simplification tolerance
    pub fn with_simplify_epsilon(mut self, epsilon: f32) -> Self {
        self.simplify_epsilon = epsilon;
        self
    }

    /// Set the threshold polarity
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Enable or disable per-contour parallelism
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject parameter combinations the preprocessor cannot honour
    pub fn validate(&self) -> Result<(), LocateError> {
        if self.block_size <= 1 || self.block_size % 2 == 0 {
            return Err(LocateError::InvalidBlockSize {
                block_size: self.block_size,
            });
        }
        if self.close_size == 0 {
            return Err(LocateError::InvalidCloseSize {
                close_size: self.close_size,
            });
        }
        if !self.c.is_finite() {
            return Err(LocateError::InvalidOffset { c: self.c });
        }
        if !self.simplify_epsilon.is_finite() || self.simplify_epsilon < 0.0 {
            return Err(LocateError::InvalidSimplifyEpsilon {
                epsilon: self.simplify_epsilon,
            });
        }
        Ok(())
    }
}
