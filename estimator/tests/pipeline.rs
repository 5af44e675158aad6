use std::{fs, path::PathBuf};

use estimator::{
    ArtifactBundle, ArtifactErr, ArtifactPaths, City, EstimateErr, FeatureEncoder, FeatureSchema,
    Predictor, PredictionErr, RawInput, Regressor, Scaler,
    encoder::one_hot_column,
    model::LinearRegressor,
    scaler::{MinMaxScaler, StandardScaler},
};
use ndarray::ArrayView1;
use tempfile::tempdir;

fn demo_models() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../models")
}

fn reference_house() -> RawInput {
    RawInput {
        area: 120.0,
        building_area: 90.0,
        bedrooms: 3,
        bathrooms: 1,
        garage: 1,
        city: "Jakarta Selatan".into(),
    }
}

#[test]
fn reference_house_gets_a_positive_rupiah_price() {
    let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(demo_models())).unwrap();

    let estimate = bundle.estimate(&reference_house()).unwrap();

    assert!(estimate.price.rupiah() > 0.0);
    assert!(estimate.formatted.starts_with("Rp"), "{}", estimate.formatted);
    assert!(estimate.formatted.ends_with(",00"), "{}", estimate.formatted);
}

#[test]
fn demo_schema_covers_every_form_value() {
    let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(demo_models())).unwrap();
    let schema = bundle.schema();

    assert_eq!(schema.len(), bundle.model().n_features());
    for city in City::ALL {
        assert!(schema.contains(&one_hot_column("City", city)), "{city}");
    }
    for garage in 0..=5 {
        assert!(schema.contains(&one_hot_column("Garage", garage)));
    }
}

#[test]
fn every_city_and_garage_boundary_predicts() {
    let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(demo_models())).unwrap();

    for city in City::ALL {
        for garage in [0, 5] {
            let input = RawInput {
                garage,
                city: city.name().into(),
                ..reference_house()
            };
            let estimate = bundle.estimate(&input).unwrap();
            assert!(estimate.price.rupiah().is_finite());
        }
    }
}

#[test]
fn unknown_city_is_absorbed_not_rejected() {
    let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(demo_models())).unwrap();
    let input = RawInput {
        city: "Jayapura".into(),
        ..reference_house()
    };

    let x = bundle.encoder().encode(&input).unwrap();
    let city_total: f64 = City::ALL
        .iter()
        .filter_map(|c| bundle.schema().position(&one_hot_column("City", c)))
        .map(|i| x[i])
        .sum();

    assert_eq!(city_total, 0.0);
    assert!(bundle.estimate(&input).is_ok());
}

#[test]
fn predicting_the_same_vector_twice_is_stable() {
    let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(demo_models())).unwrap();
    let x = bundle.encoder().encode(&reference_house()).unwrap();
    let predictor = bundle.predictor();

    let a = predictor.predict(x.view()).unwrap();
    let b = predictor.predict(x.view()).unwrap();
    assert_eq!(a, b);
}

/// Ignores its input and always answers the same scaled price.
struct ConstantModel {
    n_features: usize,
    value: f64,
}

impl Regressor for ConstantModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: ArrayView1<f64>) -> Result<f64, PredictionErr> {
        if features.len() != self.n_features {
            return Err(PredictionErr::DimensionMismatch {
                got: features.len(),
                expected: self.n_features,
            });
        }
        Ok(self.value)
    }
}

#[test]
fn stub_capabilities_plug_into_the_pipeline() {
    let schema = FeatureSchema::new(vec![
        "area".into(),
        "building_area".into(),
        "City_Jakarta Selatan".into(),
    ])
    .unwrap();
    let feature_scaler: Box<dyn Scaler> =
        Box::new(StandardScaler::new(vec![100.0, 80.0], vec![20.0, 10.0]).unwrap());
    let price_scaler: Box<dyn Scaler> =
        Box::new(MinMaxScaler::new(vec![100.0], vec![300.0], (0.0, 1.0)).unwrap());
    let model: Box<dyn Regressor> = Box::new(ConstantModel {
        n_features: 3,
        value: 0.5,
    });

    let encoder = FeatureEncoder::new(feature_scaler.as_ref(), &schema);
    let x = encoder.encode(&reference_house()).unwrap();
    assert_eq!(x.to_vec(), vec![1.0, 1.0, 1.0]);

    let price = Predictor::new(model.as_ref(), price_scaler.as_ref())
        .predict(x.view())
        .unwrap();
    assert_eq!(price.format_idr(), "Rp200.000.000,00");
}

#[test]
fn mismatched_artifacts_fail_at_submission_not_at_load() {
    let dir = tempdir().unwrap();
    let src = demo_models();
    for name in ["feature_columns.json", "feature_scaler.json", "price_scaler.json"] {
        fs::copy(src.join(name), dir.path().join(name)).unwrap();
    }
    let model = estimator::ModelKind::Linear(LinearRegressor::new(vec![0.01; 10], 0.1).unwrap());
    fs::write(
        dir.path().join("rf_model.json"),
        serde_json::to_string(&model).unwrap(),
    )
    .unwrap();

    let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path())).unwrap();

    assert_eq!(
        bundle.estimate(&reference_house()),
        Err(EstimateErr::Prediction(PredictionErr::DimensionMismatch {
            got: 46,
            expected: 10
        }))
    );
}

#[test]
fn corrupted_model_is_a_load_error() {
    let dir = tempdir().unwrap();
    let src = demo_models();
    for name in ["feature_columns.json", "feature_scaler.json", "price_scaler.json"] {
        fs::copy(src.join(name), dir.path().join(name)).unwrap();
    }
    fs::write(
        dir.path().join("rf_model.json"),
        r#"{ "random_forest": { "n_features": 46, "trees": [] } }"#,
    )
    .unwrap();

    let err = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, ArtifactErr::Decode { .. }), "{err}");
    assert!(err.to_string().contains("forest has no trees"), "{err}");
}
