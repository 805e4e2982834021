//! Embedding service trait

use async_trait::async_trait;
use cmet_core::{ModelSpec, Result};

/// Options passed through to the embedding service
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
    /// Maximum texts per request (None = all at once)
    pub batch_size: Option<usize>,
}

/// Trait for services turning texts into embedding vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Name of the backend
    fn name(&self) -> &'static str;

    /// Embed `texts` with `model`
    ///
    /// Returns one unit-normalized vector per input text, in input order.
    async fn embed(
        &self,
        texts: &[&str],
        model: &ModelSpec,
        options: &EmbedOptions,
    ) -> Result<Vec<Vec<f32>>>;
}

/// Scale `vector` to unit length (zero vectors are left alone)
pub fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
}

/// Dot product accumulated in f64
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(dot(&[0.5, 0.5], &[1.0, 1.0]), 1.0);
    }
}
