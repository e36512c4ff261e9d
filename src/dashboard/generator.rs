//! Reading Generator
//!
//! Produces one simulated temperature reading per tick.

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::{DashboardError, DashboardResult};
use super::types::Reading;
use crate::config::SensorConfig;

/// Most decimal places a reading can be rounded to before `f64` scaling
/// loses precision
pub const MAX_DECIMALS: u32 = 15;

/// Source of readings, invoked once per tick
pub trait ReadingGenerator: Send {
    /// Produce exactly one reading
    fn generate(&mut self) -> DashboardResult<Reading>;
}

/// Uniform random temperature in a fixed inclusive range, stamped with the
/// current local time
pub struct TemperatureGenerator<R = StdRng> {
    rng: R,
    min: f64,
    max: f64,
    decimals: u32,
}

impl TemperatureGenerator<StdRng> {
    /// Create a generator seeded from OS entropy
    pub fn new(min: f64, max: f64, decimals: u32) -> Self {
        Self::with_rng(StdRng::from_entropy(), min, max, decimals)
    }

    /// Create a generator for the configured sensor
    pub fn from_config(config: &SensorConfig) -> Self {
        Self::new(config.min, config.max, config.decimals)
    }

    /// Create a deterministic generator (values only; timestamps still
    /// follow the wall clock)
    pub fn seeded(seed: u64, min: f64, max: f64, decimals: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), min, max, decimals)
    }
}

impl<R: Rng> TemperatureGenerator<R> {
    pub fn with_rng(rng: R, min: f64, max: f64, decimals: u32) -> Self {
        Self {
            rng,
            min,
            max,
            decimals,
        }
    }

    fn draw(&mut self) -> DashboardResult<f64> {
        let (lo, hi) = value_bounds(self.min, self.max, self.decimals)
            .map_err(DashboardError::GeneratorFailure)?;

        let raw = self.rng.gen_range(self.min..=self.max);
        Ok(round_to(raw, self.decimals).clamp(lo, hi))
    }
}

impl<R: Rng + Send> ReadingGenerator for TemperatureGenerator<R> {
    fn generate(&mut self) -> DashboardResult<Reading> {
        let value = self.draw()?;
        Ok(Reading::new(value, Local::now().naive_local()))
    }
}

/// Round half away from zero to a fixed number of decimals
///
/// `decimals` above [`MAX_DECIMALS`] is treated as [`MAX_DECIMALS`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * factor).round() / factor
}

/// Smallest and largest values with `decimals` places inside `[min, max]`
///
/// Generated readings are clamped to these bounds, so a reading never has
/// more decimals than configured even when the range ends are off the grid.
pub fn value_bounds(min: f64, max: f64, decimals: u32) -> Result<(f64, f64), String> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(format!("invalid value range [{}, {}]", min, max));
    }
    if decimals > MAX_DECIMALS {
        return Err(format!(
            "{} decimals exceeds the maximum of {}",
            decimals, MAX_DECIMALS
        ));
    }

    let factor = 10f64.powi(decimals as i32);
    let mut lo = round_to(min, decimals);
    if lo < min {
        lo = ((lo * factor).round() + 1.0) / factor;
    }
    let mut hi = round_to(max, decimals);
    if hi > max {
        hi = ((hi * factor).round() - 1.0) / factor;
    }

    if lo > hi {
        return Err(format!(
            "no value with {} decimals in [{}, {}]",
            decimals, min, max
        ));
    }
    Ok((lo, hi))
}
