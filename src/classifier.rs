//! Loading and running the trained doodle model, plus ranking of its output

use crate::config::CATEGORIES;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::Path;
use tract_onnx::prelude::tract_ndarray::Array4;
use tract_onnx::prelude::*;
use tract_onnx::tract_core;

/// An optimized, runnable tract plan for the doodle network
pub type DoodlePlan = tract_core::model::typed::RunnableModel<
    TypedFact,
    Box<dyn TypedOp>,
    Graph<TypedFact, Box<dyn TypedOp>>,
>;

/// One category paired with the probability the model assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub category: &'static str,
    pub probability: f32,
}

/// The inference seam: anything that maps a preprocessed input tensor to one
/// probability per category. The production implementation is [`DoodleModel`];
/// tests substitute a fixed-output stand-in.
pub trait Classifier: Send + Sync {
    fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>>;
}

/// Load and run an ONNX export of the trained doodle network
pub struct DoodleModel {
    plan: DoodlePlan,
}

impl DoodleModel {
    /// Load the model artifact and pin its input to f32 x (1, 28, 28, 1)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec![1, 28, 28, 1]))?
            .into_optimized()?
            .into_runnable()?;
        Ok(DoodleModel { plan })
    }
}

impl Classifier for DoodleModel {
    fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>> {
        let outputs = self.plan.run(tvec!(input.into_tensor().into()))?;
        let view = outputs[0].to_array_view::<f32>()?;
        Ok(view.iter().copied().collect())
    }
}

/// Pair each probability with its category by index and sort descending.
/// The sort is stable, so exact ties keep category-index order.
pub fn rank(probabilities: &[f32]) -> Result<Vec<Prediction>> {
    if probabilities.len() != CATEGORIES.len() {
        return Err(anyhow!(
            "model returned {} probabilities for {} categories",
            probabilities.len(),
            CATEGORIES.len()
        ));
    }

    let mut ranked: Vec<Prediction> = CATEGORIES
        .iter()
        .zip(probabilities)
        .map(|(category, probability)| Prediction {
            category,
            probability: *probability,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_sorts_descending() {
        let probs = [0.05, 0.4, 0.1, 0.15, 0.02, 0.08, 0.12, 0.08];
        let ranked = rank(&probs).unwrap();
        assert_eq!(ranked.len(), CATEGORIES.len());
        assert_eq!(ranked[0].category, "dog");
        assert!(ranked
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
    }

    #[test]
    fn rank_keeps_category_order_on_ties() {
        let probs = [0.1; 8];
        let ranked = rank(&probs).unwrap();
        let categories: Vec<&str> = ranked.iter().map(|p| p.category).collect();
        assert_eq!(categories, CATEGORIES.to_vec());
    }

    #[test]
    fn rank_rejects_mismatched_vector() {
        assert!(rank(&[0.5, 0.5]).is_err());
    }
}
