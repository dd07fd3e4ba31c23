//! Gradient-boosted regression trees.
//!
//! Each tree is a flat node array with node 0 as the root. Split nodes go
//! left when `feature <= threshold`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::Regressor;
use crate::error::PredictionError;

/// A tree node: either a split on one feature or a leaf value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf.
    ///
    /// The walk is capped at one step per node, so a tree whose child links
    /// form a cycle ends in [`PredictionError::BrokenTree`].
    pub fn evaluate(&self, tree_idx: usize, features: &[f64]) -> Result<f64, PredictionError> {
        let mut idx = 0usize;
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(idx).ok_or(PredictionError::BrokenTree {
                tree: tree_idx,
                node: idx,
            })?;
            match *node {
                Node::Leaf { value } => return Ok(value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value =
                        *features
                            .get(feature)
                            .ok_or(PredictionError::FeatureOutOfRange {
                                tree: tree_idx,
                                node: idx,
                                feature,
                            })?;
                    idx = if value <= threshold { left } else { right };
                }
            }
        }
        Err(PredictionError::BrokenTree {
            tree: tree_idx,
            node: idx,
        })
    }

    /// Largest feature index used by any split, if the tree has splits.
    pub fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Split { feature, .. } => Some(*feature),
                Node::Leaf { .. } => None,
            })
            .max()
    }

    /// Check that the tree is non-empty and every child index is in range.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            bail!("tree has no nodes");
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Node::Split { left, right, .. } = node {
                if *left >= self.nodes.len() || *right >= self.nodes.len() {
                    bail!("node {i} has child out of range (left {left}, right {right})");
                }
            }
        }
        Ok(())
    }
}

/// Additive tree ensemble: `base_score + learning_rate * Σ leaf`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    pub fn validate(&self, width: usize) -> Result<()> {
        if self.trees.is_empty() {
            bail!("gradient boosting model has no trees");
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate().with_context(|| format!("tree {t}"))?;
            if let Some(max) = tree.max_feature() {
                if max >= width {
                    bail!("tree {t} splits on feature {max} but only {width} columns exist");
                }
            }
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn input_width(&self) -> Option<usize> {
        self.feature_names.as_ref().map(Vec::len)
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if let Some(expected) = self.input_width() {
            if expected != features.len() {
                return Err(PredictionError::WidthMismatch {
                    expected,
                    actual: features.len(),
                });
            }
        }
        let mut sum = 0.0;
        for (t, tree) in self.trees.iter().enumerate() {
            sum += tree.evaluate(t, features)?;
        }
        Ok(self.base_score + self.learning_rate * sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on feature 0 at 100: left leaf 1.0, right leaf 2.0.
    fn stump() -> Tree {
        Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 100.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: 1.0 },
                Node::Leaf { value: 2.0 },
            ],
        }
    }

    #[test]
    fn split_goes_left_on_equal() {
        let tree = stump();
        assert_eq!(tree.evaluate(0, &[100.0]), Ok(1.0));
        assert_eq!(tree.evaluate(0, &[100.5]), Ok(2.0));
        assert_eq!(tree.evaluate(0, &[30.0]), Ok(1.0));
    }

    #[test]
    fn ensemble_sums_scaled_leaves() {
        let model = TreeEnsemble {
            base_score: 10.0,
            learning_rate: 0.5,
            trees: vec![stump(), stump()],
            feature_names: None,
        };
        assert_eq!(model.predict(&[500.0]), Ok(12.0));
    }

    #[test]
    fn feature_out_of_range_is_reported() {
        let tree = stump();
        assert_eq!(
            tree.evaluate(3, &[]),
            Err(PredictionError::FeatureOutOfRange {
                tree: 3,
                node: 0,
                feature: 0
            })
        );
    }

    #[test]
    fn width_mismatch_with_feature_names() {
        let model = TreeEnsemble {
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![stump()],
            feature_names: Some(vec!["Area".into(), "Room".into()]),
        };
        assert_eq!(
            model.predict(&[1.0]),
            Err(PredictionError::WidthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_children_and_empty_trees() {
        let bad = Tree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 1,
                right: 5,
            }],
        };
        assert!(bad.validate().is_err());
        assert!(Tree { nodes: vec![] }.validate().is_err());
    }

    #[test]
    fn shared_earlier_child_is_valid() {
        // Node 2 reuses leaf 1 as its left child.
        let tree = Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: 1.0 },
                Node::Split {
                    feature: 0,
                    threshold: 5.0,
                    left: 1,
                    right: 3,
                },
                Node::Leaf { value: 2.0 },
            ],
        };
        assert!(tree.validate().is_ok());
        assert_eq!(tree.evaluate(0, &[0.5]), Ok(1.0));
        assert_eq!(tree.evaluate(0, &[3.0]), Ok(1.0));
        assert_eq!(tree.evaluate(0, &[9.0]), Ok(2.0));
    }

    #[test]
    fn cycle_ends_in_broken_tree() {
        let cyclic = Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 2,
                },
                Node::Leaf { value: 0.0 },
            ],
        };
        assert!(cyclic.validate().is_ok());
        assert!(matches!(
            cyclic.evaluate(0, &[0.0]),
            Err(PredictionError::BrokenTree { tree: 0, .. })
        ));
        assert_eq!(cyclic.evaluate(0, &[2.0]), Ok(0.0));
    }

    #[test]
    fn ensemble_validate_checks_feature_width() {
        let model = TreeEnsemble {
            base_score: 0.0,
            learning_rate: 1.0,
            trees: vec![stump()],
            feature_names: None,
        };
        assert!(model.validate(1).is_ok());
        assert!(model.validate(0).is_err());
    }

    #[test]
    fn nodes_deserialize_untagged() {
        let json = r#"{"trees":[{"nodes":[
            {"feature":0,"threshold":2.5,"left":1,"right":2},
            {"value":-1.0},
            {"value":1.0}
        ]}]}"#;
        let model: TreeEnsemble = serde_json::from_str(json).unwrap();
        assert_eq!(model.learning_rate, 1.0);
        assert_eq!(model.base_score, 0.0);
        assert_eq!(model.predict(&[3.0]), Ok(1.0));
    }
}
