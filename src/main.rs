use std::env;

use anyhow::Context;
use log::info;

use model_core::{
    backend::{Backend, CpuBackend},
    config::{ConfigManager, TrainingConfig},
    data::LocalSource,
    training::TrainingCore,
};

const DEFAULT_CONFIG: &str = "config.json";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let manager = ConfigManager::new(config_path, args.next());

    let value = manager.load_config()?;
    let config = TrainingConfig::from_value(value)
        .with_context(|| format!("reading {}", manager.config_path().display()))?;

    let mut source = LocalSource::new(&config.dataset.root);
    let mut core = TrainingCore::<CpuBackend>::new();
    core.setup_from_source(&config.setup(), &mut source)
        .context("setting up the training")?;

    for epoch in 0..config.epochs {
        let y_hat = core.forward_propagation()?;
        if epoch % config.log_every == 0 {
            let loss = core.compute_loss(&y_hat)?;
            info!(epoch = epoch, loss = loss; "training");
        }

        let gradients = core.back_propagation(&y_hat)?;
        core.update_parameters(&gradients)?;
    }

    let y_hat = core.forward_propagation()?;
    let loss = core.compute_loss(&y_hat)?;
    info!(loss = loss; "training finished after {} epochs", config.epochs);
    let predictions = core.denormalise_label(&y_hat)?;
    info!("predictions in {} units: {predictions:?}", config.label);

    if let Some(params) = core.get_parameters() {
        info!(
            "W_0 = {:?}, b = {}",
            CpuBackend::to_host(params.w_0()),
            params.b()
        );
    }

    Ok(())
}
