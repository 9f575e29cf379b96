//! Observable time series and their kinetic post-processing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SrpError};

/// Singlet and triplet populations sampled on the simulation time grid.
///
/// Both channels always share the same length, `n_steps + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservableSeries {
    singlet: Vec<f64>,
    triplet: Vec<f64>,
}

impl ObservableSeries {
    /// Allocates a zero-filled series with `len` samples per channel.
    pub fn zeros(len: usize) -> Self {
        Self {
            singlet: vec![0.0; len],
            triplet: vec![0.0; len],
        }
    }

    /// Builds a series from explicit channels.
    pub fn from_channels(singlet: Vec<f64>, triplet: Vec<f64>) -> Result<Self, SrpError> {
        if singlet.len() != triplet.len() {
            return Err(SrpError::InvalidArgument(
                ErrorInfo::new("series_channels", "singlet and triplet lengths differ")
                    .with_context("singlet", singlet.len())
                    .with_context("triplet", triplet.len()),
            ));
        }
        Ok(Self { singlet, triplet })
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.singlet.len()
    }

    /// Returns true when the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.singlet.is_empty()
    }

    /// Singlet population channel.
    pub fn singlet(&self) -> &[f64] {
        &self.singlet
    }

    /// Triplet population channel.
    pub fn triplet(&self) -> &[f64] {
        &self.triplet
    }

    /// Resets every sample to zero, keeping the allocation.
    pub fn fill_zero(&mut self) {
        self.singlet.iter_mut().for_each(|x| *x = 0.0);
        self.triplet.iter_mut().for_each(|x| *x = 0.0);
    }

    /// Multiplies every sample by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.singlet.iter_mut().for_each(|x| *x *= factor);
        self.triplet.iter_mut().for_each(|x| *x *= factor);
    }

    /// Adds `other` sample by sample.
    pub fn add_assign(&mut self, other: &ObservableSeries) -> Result<(), SrpError> {
        if other.len() != self.len() {
            return Err(SrpError::InvalidArgument(
                ErrorInfo::new("series_length", "cannot add series of different lengths")
                    .with_context("expected", self.len())
                    .with_context("found", other.len()),
            ));
        }
        for (acc, x) in self.singlet.iter_mut().zip(&other.singlet) {
            *acc += x;
        }
        for (acc, x) in self.triplet.iter_mut().zip(&other.triplet) {
            *acc += x;
        }
        Ok(())
    }

    /// Integrates the populations against the recombination rates.
    ///
    /// Yields are cumulative trapezoid integrals `k ∫ P(t) dt` on the grid.
    pub fn derive_kinetics(&self, dt: f64, k_s: f64, k_t: f64) -> Kinetics {
        let time = (0..self.len()).map(|step| step as f64 * dt).collect();
        let singlet_yield = cumulative_trapezoid(&self.singlet, dt, k_s);
        let triplet_yield = cumulative_trapezoid(&self.triplet, dt, k_t);
        Kinetics {
            total_singlet_yield: singlet_yield.last().copied().unwrap_or(0.0),
            total_triplet_yield: triplet_yield.last().copied().unwrap_or(0.0),
            time,
            singlet_yield,
            triplet_yield,
        }
    }

    /// Writes the series and its kinetics as CSV to `path`.
    pub fn write_csv(&self, path: &Path, kinetics: &Kinetics) -> Result<(), SrpError> {
        if kinetics.time.len() != self.len() {
            return Err(SrpError::InvalidArgument(
                ErrorInfo::new("kinetics_length", "kinetics do not match the series")
                    .with_context("series", self.len())
                    .with_context("kinetics", kinetics.time.len()),
            ));
        }
        let mut writer =
            csv::Writer::from_path(path).map_err(|err| SrpError::io("series_csv_open", err))?;
        for step in 0..self.len() {
            writer
                .serialize(SeriesRow {
                    t: kinetics.time[step],
                    p_singlet: self.singlet[step],
                    p_triplet: self.triplet[step],
                    yield_singlet: kinetics.singlet_yield[step],
                    yield_triplet: kinetics.triplet_yield[step],
                })
                .map_err(|err| SrpError::io("series_csv_row", err))?;
        }
        writer
            .flush()
            .map_err(|err| SrpError::io("series_csv_flush", err))
    }
}

fn cumulative_trapezoid(values: &[f64], dt: f64, rate: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for (step, value) in values.iter().enumerate() {
        if step > 0 {
            acc += 0.5 * dt * rate * (values[step - 1] + value);
        }
        out.push(acc);
    }
    out
}

/// Recombination yields derived from an [`ObservableSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kinetics {
    /// Sample times.
    pub time: Vec<f64>,
    /// Cumulative singlet yield at each sample time.
    pub singlet_yield: Vec<f64>,
    /// Cumulative triplet yield at each sample time.
    pub triplet_yield: Vec<f64>,
    /// Singlet yield at the final time.
    pub total_singlet_yield: f64,
    /// Triplet yield at the final time.
    pub total_triplet_yield: f64,
}

#[derive(Serialize)]
struct SeriesRow {
    t: f64,
    p_singlet: f64,
    p_triplet: f64,
    yield_singlet: f64,
    yield_triplet: f64,
}
