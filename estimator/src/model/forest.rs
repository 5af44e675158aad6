use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::{Regressor, check_dimension};
use crate::error::PredictionErr;

/// Child index marking a leaf.
const LEAF: i64 = -1;

#[derive(Deserialize)]
struct TreeParams {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

/// A binary regression tree stored as parallel node arrays.
///
/// Node `i` is a leaf when both of its children are `-1`; otherwise rows with
/// `x[feature[i]] <= threshold[i]` go to `children_left[i]` and the rest to
/// `children_right[i]`. Nodes are laid out depth-first, so every child index is
/// greater than its parent's and traversal always terminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeParams")]
pub struct RegressionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

impl RegressionTree {
    /// Creates a new `RegressionTree` from its node arrays.
    ///
    /// # Errors
    /// Returns a description of the first structural problem found.
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
    ) -> Result<Self, String> {
        let n = children_left.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }

        let lengths = [
            children_right.len(),
            feature.len(),
            threshold.len(),
            value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(format!(
                "node arrays differ in length: {n} children_left, {} children_right, \
                 {} feature, {} threshold, {} value",
                lengths[0], lengths[1], lengths[2], lengths[3]
            ));
        }

        for i in 0..n {
            let (left, right) = (children_left[i], children_right[i]);

            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {i} has only one child"));
                }
                if !value[i].is_finite() {
                    return Err(format!("leaf {i} has a non-finite value"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {i} points to invalid child {child}"));
                }
            }
            if feature[i] < 0 {
                return Err(format!("split node {i} has no feature"));
            }
            if !threshold[i].is_finite() {
                return Err(format!("split node {i} has a non-finite threshold"));
            }
        }

        Ok(Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        })
    }

    /// Highest feature index any split reads, if the tree has splits.
    pub fn max_feature(&self) -> Option<usize> {
        (0..self.children_left.len())
            .filter(|&i| self.children_left[i] != LEAF)
            .map(|i| self.feature[i] as usize)
            .max()
    }

    /// Walks from the root to a leaf.
    ///
    /// `features` must be at least `max_feature() + 1` long.
    fn predict_row(&self, features: &ArrayView1<f64>) -> f64 {
        let mut node = 0;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return self.value[node];
            }

            let x = features[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

impl TryFrom<TreeParams> for RegressionTree {
    type Error = String;

    fn try_from(p: TreeParams) -> Result<Self, Self::Error> {
        Self::new(
            p.children_left,
            p.children_right,
            p.feature,
            p.threshold,
            p.value,
        )
    }
}

#[derive(Deserialize)]
struct ForestParams {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

/// An ensemble of regression trees whose prediction is the mean of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestParams")]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Creates a new `RandomForest`.
    ///
    /// # Errors
    /// Returns a description of the problem if there are no trees or a tree
    /// splits on a feature outside `0..n_features`.
    pub fn new(n_features: usize, trees: Vec<RegressionTree>) -> Result<Self, String> {
        if trees.is_empty() {
            return Err("forest has no trees".into());
        }

        for (i, tree) in trees.iter().enumerate() {
            if let Some(f) = tree.max_feature().filter(|&f| f >= n_features) {
                return Err(format!(
                    "tree {i} splits on feature {f} but the model has {n_features} feature(s)"
                ));
            }
        }

        Ok(Self { n_features, trees })
    }

}

impl TryFrom<ForestParams> for RandomForest {
    type Error = String;

    fn try_from(p: ForestParams) -> Result<Self, Self::Error> {
        Self::new(p.n_features, p.trees)
    }
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, PredictionErr> {
        check_dimension(&features, self.n_features)?;

        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(&features))
            .sum();

        Ok(sum / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    /// x0 <= 0.5 ? (x1 <= 0.5 ? 1 : 2) : 3
    fn stump_pair() -> RegressionTree {
        RegressionTree::new(
            vec![1, 2, -1, -1, -1],
            vec![4, 3, -1, -1, -1],
            vec![0, 1, -2, -2, -2],
            vec![0.5, 0.5, -2.0, -2.0, -2.0],
            vec![0.0, 0.0, 1.0, 2.0, 3.0],
        )
        .unwrap()
    }

    fn leaf(value: f64) -> RegressionTree {
        RegressionTree::new(vec![LEAF], vec![LEAF], vec![-2], vec![-2.0], vec![value]).unwrap()
    }

    #[test]
    fn tree_follows_splits() {
        let tree = stump_pair();

        assert_eq!(tree.predict_row(&array![0.2, 0.1].view()), 1.0);
        assert_eq!(tree.predict_row(&array![0.2, 0.9].view()), 2.0);
        assert_eq!(tree.predict_row(&array![0.9, 0.1].view()), 3.0);
    }

    #[test]
    fn threshold_equality_goes_left() {
        let tree = stump_pair();
        assert_eq!(tree.predict_row(&array![0.5, 0.5].view()), 1.0);
    }

    #[test]
    fn forest_averages_trees() {
        let forest = RandomForest::new(
            2,
            vec![stump_pair(), leaf(5.0)],
        )
        .unwrap();

        let y = forest.predict(array![0.9, 0.0].view()).unwrap();
        assert_eq!(y, 4.0);
    }

    #[test]
    fn forest_rejects_wrong_dimension() {
        let forest = RandomForest::new(2, vec![stump_pair()]).unwrap();
        assert_eq!(
            forest.predict(array![0.1, 0.2, 0.3].view()),
            Err(PredictionErr::DimensionMismatch {
                got: 3,
                expected: 2
            })
        );
    }

    #[test]
    fn rejects_malformed_trees() {
        // child pointing backwards would loop forever
        assert!(
            RegressionTree::new(
                vec![0, -1],
                vec![1, -1],
                vec![0, -2],
                vec![0.5, -2.0],
                vec![0.0, 1.0]
            )
            .is_err()
        );
        // half a leaf
        assert!(RegressionTree::new(vec![-1], vec![0], vec![0], vec![0.0], vec![0.0]).is_err());
        // ragged arrays
        assert!(RegressionTree::new(vec![-1], vec![-1], vec![], vec![0.0], vec![0.0]).is_err());
        assert!(RegressionTree::new(vec![], vec![], vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn forest_rejects_out_of_range_features() {
        let err = RandomForest::new(1, vec![stump_pair()]).unwrap_err();
        assert!(err.contains("feature 1"), "{err}");
        assert!(RandomForest::new(2, vec![]).is_err());
    }

    #[test]
    fn decodes_from_json() {
        let json = r#"{
            "random_forest": {
                "n_features": 1,
                "trees": [{
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [0, -2, -2],
                    "threshold": [10.0, -2.0, -2.0],
                    "value": [0.0, 0.25, 0.75]
                }]
            }
        }"#;

        let model: super::super::ModelKind = serde_json::from_str(json).unwrap();
        assert_eq!(model.n_features(), 1);
        assert_eq!(model.predict(array![11.0].view()).unwrap(), 0.75);
    }
}
