//! Continuous and discrete deviates drawn from [`Xoroshiro128Plus`].
//!
//! Rates and means are not validated; callers guarantee `rate > 0` and
//! `lambda > 0`.

use std::f64::consts::PI;

use crate::engine::Xoroshiro128Plus;

/// Means at or above this value use transformed rejection instead of Knuth's product method.
pub const PTRS_THRESHOLD: f64 = 10.0;

const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function (Lanczos approximation).
pub fn log_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection keeps the series in its accurate range.
        return (PI / (PI * x).sin()).ln() - log_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut sum = LANCZOS[0];
    for (i, c) in LANCZOS.iter().enumerate().skip(1) {
        sum += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

impl Xoroshiro128Plus {
    /// Uniform deviate in `[-1, 1)`.
    #[inline]
    fn signed_unit(&mut self) -> f64 {
        2.0 * self.unif01() - 1.0
    }

    /// Rejection-samples a point strictly inside the unit disc, excluding the origin.
    fn unit_disc(&mut self) -> (f64, f64, f64) {
        loop {
            let x = self.signed_unit();
            let y = self.signed_unit();
            let s = x * x + y * y;
            if s < 1.0 && s > 0.0 {
                return (x, y, s);
            }
        }
    }

    /// Two independent standard normal deviates from one polar acceptance.
    pub fn two_normals(&mut self) -> (f64, f64) {
        let (x, y, s) = self.unit_disc();
        let f = (-2.0 * s.ln() / s).sqrt();
        (x * f, y * f)
    }

    /// Standard normal deviate (Marsaglia polar method).
    ///
    /// Every other call is served from the value cached by the previous one.
    pub fn normal(&mut self) -> f64 {
        if let Some(cached) = self.cached_normal.take() {
            return cached;
        }
        let (first, second) = self.two_normals();
        self.cached_normal = Some(second);
        first
    }

    /// Normal deviate with the given mean and standard deviation.
    pub fn normal_with(&mut self, mean: f64, sd: f64) -> f64 {
        mean + sd * self.normal()
    }

    /// Exponential deviate with the given rate.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        // 1 - U lies in (0, 1], so the log is finite.
        -(1.0 - self.unif01()).ln() / rate
    }

    /// Poisson deviate with mean `lambda`.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda < PTRS_THRESHOLD {
            self.poisson_knuth(lambda)
        } else {
            self.poisson_ptrs(lambda)
        }
    }

    fn poisson_knuth(&mut self, lambda: f64) -> u64 {
        let limit = (-lambda).exp();
        let mut product = 1.0;
        let mut count = 0u64;
        loop {
            product *= self.unif01();
            if product <= limit {
                return count;
            }
            count += 1;
        }
    }

    /// Hörmann's transformed rejection with squeeze (PTRS).
    fn poisson_ptrs(&mut self, lambda: f64) -> u64 {
        let log_lambda = lambda.ln();
        let b = 0.931 + 2.53 * lambda.sqrt();
        let a = -0.059 + 0.02483 * b;
        let inv_alpha = 1.1239 + 1.1328 / (b - 3.4);
        let vr = 0.9277 - 3.6224 / (b - 2.0);
        loop {
            let u = self.unif01() - 0.5;
            let v = self.unif01();
            let us = 0.5 - u.abs();
            let k = ((2.0 * a / us + b) * u + lambda + 0.43).floor();
            if us >= 0.07 && v <= vr {
                return k as u64;
            }
            if k < 0.0 || (us < 0.013 && v > us) {
                continue;
            }
            let lhs = (v * inv_alpha / (a / (us * us) + b)).ln();
            let rhs = -lambda + k * log_lambda - log_gamma(k + 1.0);
            if lhs <= rhs {
                return k as u64;
            }
        }
    }

    /// Uniform point on a circle of the given radius.
    pub fn circle(&mut self, radius: f64) -> [f64; 2] {
        let (x, y, s) = self.unit_disc();
        [radius * (x * x - y * y) / s, radius * 2.0 * x * y / s]
    }

    /// Uniform point on a sphere of the given radius.
    pub fn sphere(&mut self, radius: f64) -> [f64; 3] {
        let (x, y, s) = self.unit_disc();
        let scale = 2.0 * (1.0 - s).sqrt();
        [radius * x * scale, radius * y * scale, radius * (1.0 - 2.0 * s)]
    }
}
