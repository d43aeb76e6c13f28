//! Headless proposal simulation
//!
//! Usage:
//!   valentine-sim [--attempts N] [--seed S] [--accept] [--config PATH] [--log LEVEL]
//!
//! Drives a `ProposalPlugin` app through N decline attempts, optionally
//! accepts, and prints one JSON snapshot per frame to stdout.

use anyhow::Context;
use bevy::prelude::*;

use valentine_core::config::ProposalConfig;
use valentine_core::logging::{init_tracing, LogLevel, TracingConfig};
use valentine_core::plugin::{AcceptActivateEvent, DeclineAttemptEvent, ProposalPlugin};
use valentine_core::session::{AcceptTarget, ProposalSession};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let attempts = parse_arg(&args, "--attempts").unwrap_or(10);
    let seed = parse_arg(&args, "--seed").unwrap_or(42);
    let accept = args.iter().any(|a| a == "--accept");
    let level = parse_str_arg(&args, "--log")
        .map(|name| LogLevel::from_name(&name))
        .unwrap_or(LogLevel::Info);

    init_tracing(&TracingConfig::with_level(level));

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => ProposalConfig::load(&path)
            .with_context(|| format!("loading proposal config from {path}"))?,
        None => ProposalConfig::default(),
    };

    tracing::info!(attempts, seed, accept, "starting proposal simulation");

    let mut app = App::new();
    app.add_plugins(ProposalPlugin { config, seed });
    app.update();
    print_snapshot(&app)?;

    for _ in 0..attempts {
        app.world_mut().send_event(DeclineAttemptEvent);
        app.update();
        print_snapshot(&app)?;
    }

    if accept {
        app.world_mut().send_event(AcceptActivateEvent {
            target: AcceptTarget::Primary,
        });
        app.update();
        print_snapshot(&app)?;
    }

    Ok(())
}

fn print_snapshot(app: &App) -> anyhow::Result<()> {
    let snapshot = app.world().resource::<ProposalSession>().snapshot();
    let json = serde_json::to_string(&snapshot).context("serializing session snapshot")?;
    println!("{json}");
    Ok(())
}

fn parse_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|val| val.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
