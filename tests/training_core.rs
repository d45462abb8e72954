mod common;

use approx::assert_relative_eq;
use model_core::{
    ModelErr,
    backend::{Backend, CpuBackend},
    data::{Dataset, DatasetRef, LocalSource},
    training::{BIAS_KEY, Gradients, LinearRegressionSetup, TrainingCore, WEIGHTS_KEY},
};
use ndarray::array;

use common::tv_sales;

const LEARNING_RATE: f64 = 1e-8;

fn setup() -> LinearRegressionSetup {
    LinearRegressionSetup::new(["TV"], "Sales", LEARNING_RATE).with_source(DatasetRef::new(
        "devzohaib/tvmarketingcsv",
        "tvmarketing.csv",
        false,
    ))
}

fn configured_core() -> TrainingCore<CpuBackend> {
    let mut core = TrainingCore::new();
    core.setup_linear_regression_training(&setup(), tv_sales())
        .unwrap();
    core
}

fn new_inputs() -> Dataset {
    Dataset::from_columns([("TV", vec![4., 5., 6.])]).unwrap()
}

#[test]
fn initialisation() {
    let core = TrainingCore::<CpuBackend>::new();

    assert!(!core.get_training_setup_completed());
    assert!(core.get_dataset().is_none());
    assert!(core.get_parameters().is_none());
    assert_eq!(core.get_input_size(), 0);
    assert_eq!(core.get_output_size(), 0);
}

#[test]
fn setup_linear_regression_training() {
    let core = configured_core();

    assert_eq!(core.get_dataset(), Some(&tv_sales()));
    assert_eq!(core.get_input_size(), 1);
    assert_eq!(core.get_output_size(), 1);
    assert_eq!(core.get_learning_rate(), Some(LEARNING_RATE));
    assert!(core.get_training_setup_completed());
}

#[test]
fn get_parameters_returns_keyed_data() {
    let core = configured_core();
    let params = core.get_parameters().unwrap().to_map();

    assert_eq!(params.len(), 2);
    assert_eq!(params[WEIGHTS_KEY], vec![0.]);
    assert_eq!(params[BIAS_KEY], vec![2.]);
}

#[test]
fn forward_propagation() {
    let core = configured_core();
    let y_hat = core.forward_propagation().unwrap();

    // untrained: one prediction per training row, all equal to the label mean
    assert_eq!(CpuBackend::len(&y_hat), 3);
    for &y in y_hat.iter() {
        assert_relative_eq!(y, 2., max_relative = 1e-3);
    }
}

#[test]
fn predict() {
    let core = configured_core();
    let y_hat = core.predict(&new_inputs()).unwrap();

    assert_eq!(y_hat.len(), 3);
    for &y in y_hat.iter() {
        assert_relative_eq!(y, 2., max_relative = 1e-3);
    }
}

#[test]
fn predict_needs_the_feature_columns() {
    let core = configured_core();
    let inputs = Dataset::from_columns([("Radio", vec![1.])]).unwrap();

    assert!(matches!(
        core.predict(&inputs),
        Err(ModelErr::MissingColumn { .. })
    ));
}

#[test]
fn denormalise_label_maps_back_to_label_units() {
    let core = configured_core();
    let labels = core.training_data().unwrap().labels().clone();

    let raw = core.denormalise_label(&labels).unwrap();
    for (got, expected) in raw.iter().zip([1., 2., 3.]) {
        assert_relative_eq!(*got, expected, max_relative = 1e-12);
    }

    let mut core = core;
    core.flush_training_setup();
    assert!(matches!(
        core.denormalise_label(&labels),
        Err(ModelErr::Precondition(_))
    ));
}

#[test]
fn back_propagation() {
    let core = configured_core();
    let y_hat = core.predict(&new_inputs()).unwrap();
    let grads = core.back_propagation(&y_hat).unwrap().to_columns();

    // untrained, so the gradients are -1 and 2 respectively
    assert_relative_eq!(grads[[0, 0]], -1., max_relative = 1e-3);
    assert_relative_eq!(grads[[0, 1]], 2., max_relative = 1e-3);
}

#[test]
fn back_propagation_against_explicit_data() {
    let core = configured_core();
    let data = core.training_data().unwrap().clone();
    let y_hat = core.forward_propagation().unwrap();

    assert_eq!(
        core.back_propagation(&y_hat).unwrap(),
        core.back_propagation_against(&y_hat, &data).unwrap()
    );
}

#[test]
fn back_propagation_rejects_mismatched_predictions() {
    let core = configured_core();

    assert!(matches!(
        core.back_propagation(&array![1., 2.]),
        Err(ModelErr::ShapeMismatch { got: 2, expected: 3, .. })
    ));
}

#[test]
fn update_parameters() {
    let mut core = configured_core();
    let before = core.get_parameters().unwrap().clone();

    let gradients = Gradients::from_columns(array![[1., 2.]].view()).unwrap();
    core.update_parameters(&gradients).unwrap();

    let after = core.get_parameters().unwrap();
    let expected_w = before.w_0()[0] - LEARNING_RATE * 1.;
    let expected_b = before.b() - LEARNING_RATE * 2.;
    assert_relative_eq!(after.w_0()[0], expected_w, max_relative = 1e-12);
    assert_relative_eq!(after.b(), expected_b, max_relative = 1e-12);
}

#[test]
fn failed_update_leaves_parameters_untouched() {
    let mut core = configured_core();
    let before = core.get_parameters().unwrap().clone();

    let gradients = Gradients::<CpuBackend>::new(array![1., 1.], 1.);
    assert!(matches!(
        core.update_parameters(&gradients),
        Err(ModelErr::ShapeMismatch { got: 2, expected: 1, .. })
    ));
    assert_eq!(core.get_parameters(), Some(&before));
}

#[test]
fn one_step_reduces_the_loss() {
    let mut core = TrainingCore::<CpuBackend>::new();
    let setup = LinearRegressionSetup::new(["TV"], "Sales", 0.5);
    core.setup_linear_regression_training(&setup, tv_sales())
        .unwrap();

    let y_hat = core.forward_propagation().unwrap();
    let before = core.compute_loss(&y_hat).unwrap();
    let gradients = core.back_propagation(&y_hat).unwrap();
    core.update_parameters(&gradients).unwrap();

    let y_hat = core.forward_propagation().unwrap();
    assert!(core.compute_loss(&y_hat).unwrap() < before);
}

#[test]
fn flush_training_setup() {
    let mut core = configured_core();
    assert!(core.get_training_setup_completed());

    core.flush_training_setup();
    assert!(!core.get_training_setup_completed());
    assert!(core.get_dataset().is_none());
    assert!(core.get_parameters().is_none());
    assert_eq!(core.get_input_size(), 0);
    assert_eq!(core.get_output_size(), 0);

    // flushing twice is fine
    core.flush_training_setup();
    assert!(!core.get_training_setup_completed());
}

#[test]
fn steps_fail_while_unconfigured() {
    let mut core = configured_core();
    let y_hat = core.forward_propagation().unwrap();
    core.flush_training_setup();

    assert!(matches!(core.forward_propagation(), Err(ModelErr::Precondition(_))));
    assert!(matches!(core.predict(&new_inputs()), Err(ModelErr::Precondition(_))));
    assert!(matches!(core.back_propagation(&y_hat), Err(ModelErr::Precondition(_))));
    assert!(matches!(core.compute_loss(&y_hat), Err(ModelErr::Precondition(_))));
    assert!(matches!(
        core.update_parameters(&Gradients::new(array![0.], 0.)),
        Err(ModelErr::Precondition(_))
    ));

    // setting up again brings it back
    core.setup_linear_regression_training(&setup(), tv_sales())
        .unwrap();
    assert!(core.forward_propagation().is_ok());
}

#[test]
fn failed_setup_keeps_the_previous_one() {
    let mut core = configured_core();
    let bad = LinearRegressionSetup::new(["Radio"], "Sales", LEARNING_RATE);

    assert!(matches!(
        core.setup_linear_regression_training(&bad, tv_sales()),
        Err(ModelErr::MissingColumn { .. })
    ));
    assert!(core.get_training_setup_completed());
    assert_eq!(core.get_dataset(), Some(&tv_sales()));
}

#[test]
fn setup_from_local_source() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("devzohaib/tvmarketingcsv");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("tvmarketing.csv"), "TV,Sales\n1,1\n2,2\n3,3\n").unwrap();

    let mut source = LocalSource::new(root.path());
    let mut core = TrainingCore::<CpuBackend>::new();
    core.setup_from_source(&setup(), &mut source).unwrap();

    assert_eq!(core.get_dataset(), Some(&tv_sales()));
    assert_eq!(source.cached(), 0);
}

#[test]
fn setup_from_source_needs_a_reference() {
    let root = tempfile::tempdir().unwrap();
    let mut source = LocalSource::new(root.path());
    let mut core = TrainingCore::<CpuBackend>::new();
    let setup = LinearRegressionSetup::new(["TV"], "Sales", LEARNING_RATE);

    assert!(matches!(
        core.setup_from_source(&setup, &mut source),
        Err(ModelErr::Precondition(_))
    ));
}
