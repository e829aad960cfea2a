//! Compare approximate kernel values against the exact Gaussian kernel.
//!
//! Fits the structured Fastfood approximator and the dense RBF sampler on a
//! small dataset and prints how closely the feature inner products track the
//! exact kernel as the number of components grows.

use anyhow::Result;
use fastfood_features::{Fastfood, FastfoodConfig, FeatureMap, RbfSampler};
use scirs2_core::ndarray::Array2;

fn exact_gaussian(x: &[f64], y: &[f64], sigma: f64) -> f64 {
    let sq_dist: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    (-sq_dist / (2.0 * sigma * sigma)).exp()
}

fn feature_dot(features: &Array2<f64>, i: usize, j: usize) -> f64 {
    features
        .row(i)
        .iter()
        .zip(features.row(j).iter())
        .map(|(a, b)| a * b)
        .sum()
}

fn main() -> Result<()> {
    let sigma = 1.5;
    let gamma = 1.0 / (2.0 * sigma * sigma);

    let data = Array2::from_shape_fn((4, 10), |(i, j)| ((i * 10 + j) as f64 * 0.29).sin());
    let exact = exact_gaussian(
        data.row(0).to_vec().as_slice(),
        data.row(1).to_vec().as_slice(),
        sigma,
    );
    println!("exact K(x0, x1)      = {exact:.5}");

    for n_components in [16, 128, 1024, 8192] {
        let mut fastfood = Fastfood::new(FastfoodConfig::new(sigma, n_components).with_seed(42))?;
        let structured = fastfood.fit_transform(&data.view())?;

        let mut sampler = RbfSampler::new(gamma, n_components)?.with_seed(42);
        let dense = sampler.fit_transform(&data.view())?;

        println!(
            "n = {:>5} (realized {:>5}): fastfood = {:.5}, rbf sampler = {:.5}",
            n_components,
            fastfood.realized_components().unwrap_or(0),
            feature_dot(&structured, 0, 1),
            feature_dot(&dense, 0, 1),
        );
    }

    Ok(())
}
