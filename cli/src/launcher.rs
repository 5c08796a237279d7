use std::path::Path;

use anyhow::{Context, Result, anyhow};
use engine::{
    Dispatcher, NOT_FOUND, PAYMENT_ID_NOT_FOUND, PaymentIdDispatcher, PaymentIdRequest,
    ResolutionRequest, Selection, build_dispatchers,
};
use tracing::info;

use crate::{PaymentIdArgs, RunAllArgs, RunArgs, config::Config, ui};

/// Loads the configuration, printing the failure instead of propagating it.
fn load_config(path: &Path) -> Option<Config> {
    match Config::load(path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            ui::print_config_error(path, &e);
            None
        }
    }
}

async fn bootstrap(config: &Config) -> Result<(Dispatcher, PaymentIdDispatcher)> {
    build_dispatchers::<gateway::Provider, _>(&config.gateway)
        .await
        .context("Failed to create gateway resolvers")
}

pub fn cases(config_path: &Path) {
    match Config::load(config_path) {
        Ok(cfg) => ui::print_cases(&cfg.all_cases()),
        // Listing works without a config file, configured cases are just missing.
        Err(_) => ui::print_cases(&engine::builtin_cases()),
    }
}

pub async fn run(config_path: &Path, args: RunArgs) -> Result<()> {
    let Some(cfg) = load_config(config_path) else {
        return Ok(());
    };
    let (dispatcher, _) = bootstrap(&cfg).await?;

    let request = build_request(&cfg, &dispatcher, &args)?;
    run_main(&dispatcher, request, args.json).await
}

pub async fn payment_id(config_path: &Path, args: PaymentIdArgs) -> Result<()> {
    let Some(cfg) = load_config(config_path) else {
        return Ok(());
    };
    let (_, payments) = bootstrap(&cfg).await?;

    let request = PaymentIdRequest {
        domain: args.domain,
        chain_id: args.chain,
    };
    run_payment_id(&payments, request, args.json).await
}

/// Starts both dispatchers together. Neither waits for the other.
pub async fn run_all(config_path: &Path, args: RunAllArgs) -> Result<()> {
    let Some(cfg) = load_config(config_path) else {
        return Ok(());
    };
    let (dispatcher, payments) = bootstrap(&cfg).await?;

    let request = build_request(&cfg, &dispatcher, &args.run)?;
    let payment_request = PaymentIdRequest {
        domain: args.payment_domain,
        chain_id: args.payment_chain,
    };

    info!(
        protocol = %request.protocol,
        method = %request.method,
        payment_domain = %payment_request.domain,
        "running main and payment id resolutions concurrently"
    );

    let (main, payment) = tokio::join!(
        run_main(&dispatcher, request, args.run.json),
        run_payment_id(&payments, payment_request, args.run.json),
    );
    main?;
    payment
}

/// Applies the CLI overrides to the case's selection and freezes it.
fn build_request(
    cfg: &Config,
    dispatcher: &Dispatcher,
    args: &RunArgs,
) -> Result<ResolutionRequest> {
    let registry = dispatcher.registry();
    let mut selection = Selection::new(cfg.find_case(&args.case)?, registry);

    if let Some(protocol) = args.protocol {
        selection.set_protocol(protocol, registry);
    }
    if let Some(method) = args.method {
        selection.select_method(method, registry).map_err(|e| {
            anyhow!(
                "{e}. Available methods: {}",
                ui::method_list(registry, selection.protocol())
            )
        })?;
    }

    selection.set_timeout_ms(args.timeout.unwrap_or(cfg.general.default_timeout_ms));
    selection.custom_domain = args.domain.clone().unwrap_or_default();
    selection.custom_address = args.address.clone().unwrap_or_default();
    selection.custom_chain_id = args.chain_id.clone().unwrap_or_default();

    let mut request = selection.snapshot();
    if let Some(rpc_url) = args.rpc_url.as_deref().filter(|u| !u.trim().is_empty()) {
        request.rpc_url = Some(rpc_url.to_owned());
    }

    Ok(request)
}

async fn run_main(dispatcher: &Dispatcher, request: ResolutionRequest, json: bool) -> Result<()> {
    if !dispatcher.registry().supports_timeout(request.protocol) {
        ui::print_timeout_notice(request.protocol);
    }

    let outcome = dispatcher.run(request.clone()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        ui::print_outcome(&ui::request_rows(&request), &outcome, NOT_FOUND);
    }
    Ok(())
}

async fn run_payment_id(
    payments: &PaymentIdDispatcher,
    request: PaymentIdRequest,
    json: bool,
) -> Result<()> {
    let rows = ui::payment_rows(&request);
    let outcome = payments.run(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        ui::print_outcome(&rows, &outcome, PAYMENT_ID_NOT_FOUND);
    }
    Ok(())
}
