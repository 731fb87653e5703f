//! Bounded Nelder-Mead simplex search used for ARIMA parameter estimation.

use std::cmp::Ordering;

/// Result of Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The best point found.
    pub optimal_point: Vec<f64>,
    /// The objective value at `optimal_point`.
    pub optimal_value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the simplex met the tolerance before `max_iter`.
    pub converged: bool,
}

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Spread of objective values across the simplex that counts as converged.
    pub tolerance: f64,
    /// Largest vertex-to-centroid distance that counts as converged.
    pub point_tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrinkage coefficient.
    pub sigma: f64,
    /// Initial simplex step, relative to the start value where it is non-zero.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            point_tolerance: 1e-6,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// Minimize `objective` starting from `initial`.
///
/// Every candidate vertex is clamped into `bounds` (one `(min, max)` pair per
/// dimension) before it is evaluated. The search stops once the objective
/// values and the simplex itself have both collapsed below their tolerances.
///
/// # Example
/// ```
/// use tsdetective::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     NelderMeadConfig::default(),
/// );
///
/// assert!((result.optimal_point[0] - 2.0).abs() < 1e-3);
/// assert!((result.optimal_point[1] + 1.0).abs() < 1e-3);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return NelderMeadResult {
            optimal_point: Vec::new(),
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |point: Vec<f64>| -> Vec<f64> {
        match bounds {
            Some(b) => point
                .into_iter()
                .enumerate()
                .map(|(i, x)| b.get(i).map_or(x, |&(lo, hi)| x.clamp(lo, hi)))
                .collect(),
            None => point,
        }
    };
    // NaN objectives sort last so they are replaced first.
    let score = |point: &[f64]| {
        let value = objective(point);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    };

    let mut vertices: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    let start = clamp(initial.to_vec());
    let start_value = score(&start);
    vertices.push((start, start_value));
    for i in 0..dim {
        let mut vertex = initial.to_vec();
        vertex[i] += if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        let vertex = clamp(vertex);
        let value = score(&vertex);
        vertices.push((vertex, value));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        vertices.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let best = vertices[0].1;
        let worst = vertices[dim].1;
        let second_worst = vertices[dim - 1].1;
        if (worst - best).abs() < config.tolerance
            && simplex_radius(&vertices) < config.point_tolerance
        {
            converged = true;
            break;
        }

        let centroid: Vec<f64> = (0..dim)
            .map(|j| vertices[..dim].iter().map(|(v, _)| v[j]).sum::<f64>() / dim as f64)
            .collect();
        let toward = |from: &[f64], coef: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(from.iter())
                .map(|(c, p)| c + coef * (p - c))
                .collect()
        };

        let reflected = clamp(toward(&vertices[dim].0, -config.alpha));
        let reflected_value = score(&reflected);

        if reflected_value < best {
            let expanded = clamp(toward(&reflected, config.gamma));
            let expanded_value = score(&expanded);
            vertices[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
            continue;
        }

        if reflected_value < second_worst {
            vertices[dim] = (reflected, reflected_value);
            continue;
        }

        let (contracted, contracted_value) = if reflected_value < worst {
            let point = clamp(toward(&reflected, config.rho));
            let value = score(&point);
            (point, value)
        } else {
            let point = clamp(toward(&vertices[dim].0, config.rho));
            let value = score(&point);
            (point, value)
        };
        if contracted_value < reflected_value.min(worst) {
            vertices[dim] = (contracted, contracted_value);
            continue;
        }

        let anchor = vertices[0].0.clone();
        for (vertex, value) in vertices.iter_mut().skip(1) {
            let shrunk: Vec<f64> = anchor
                .iter()
                .zip(vertex.iter())
                .map(|(a, v)| a + config.sigma * (v - a))
                .collect();
            *vertex = clamp(shrunk);
            *value = score(vertex);
        }
    }

    let (optimal_point, optimal_value) = vertices
        .into_iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .unwrap_or_else(|| (initial.to_vec(), f64::NAN));

    NelderMeadResult {
        optimal_point,
        optimal_value,
        iterations,
        converged,
    }
}

/// Largest distance from any vertex to the centroid of all vertices.
fn simplex_radius(vertices: &[(Vec<f64>, f64)]) -> f64 {
    let dim = vertices.first().map_or(0, |(v, _)| v.len());
    let n = vertices.len() as f64;
    let centroid: Vec<f64> = (0..dim)
        .map(|j| vertices.iter().map(|(v, _)| v[j]).sum::<f64>() / n)
        .collect();
    vertices
        .iter()
        .map(|(v, _)| {
            v.iter()
                .zip(&centroid)
                .map(|(x, c)| (x - c).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nelder_mead_quadratic_2d() {
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], 2.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_point[1], 3.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_value, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn nelder_mead_respects_bounds() {
        // Unconstrained minimum at x=5 lies outside [0, 3].
        let result = nelder_mead(
            |x| (x[0] - 5.0).powi(2),
            &[1.0],
            Some(&[(0.0, 3.0)]),
            NelderMeadConfig::default(),
        );

        assert_relative_eq!(result.optimal_point[0], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn nelder_mead_skips_nan_regions() {
        let result = nelder_mead(
            |x| {
                if x[0] < 0.0 {
                    f64::NAN
                } else {
                    (x[0] - 1.0).powi(2)
                }
            },
            &[0.5],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn nelder_mead_does_not_stop_on_symmetric_wide_simplex() {
        // Vertices at 0.5 and 1.5 score the same on either side of the minimum.
        let result = nelder_mead(
            |x| (x[0] - 1.0).powi(2),
            &[0.5],
            None,
            NelderMeadConfig {
                initial_step: 2.0,
                ..Default::default()
            },
        );

        assert!(result.converged);
        assert!(result.iterations > 1);
        assert_relative_eq!(result.optimal_point[0], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn simplex_radius_measures_spread() {
        let vertices = vec![(vec![0.0, 0.0], 1.0), (vec![2.0, 0.0], 1.0)];
        assert_relative_eq!(simplex_radius(&vertices), 1.0, epsilon = 1e-12);
        assert_eq!(simplex_radius(&[(vec![3.0], 0.0), (vec![3.0], 0.0)]), 0.0);
    }

    #[test]
    fn nelder_mead_empty_start() {
        let result = nelder_mead(|_| 0.0, &[], None, NelderMeadConfig::default());
        assert!(result.optimal_point.is_empty());
        assert!(!result.converged);
    }
}
