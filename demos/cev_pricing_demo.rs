// demos/cev_pricing_demo.rs

//! Demonstration of CEV option pricing and zero-mass evaluation
//!
//! This example shows how to:
//! 1. Price a strip of calls and puts across strikes
//! 2. Check put-call parity on the results
//! 3. Compare the absorption probability across elasticities
//!
//! Run with `RUST_LOG=cev_lib=debug` to see the library's logging.

use anyhow::Result;
use cev_lib::{default_configs, mass_zero, price_with_config, CevInputs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("CEV Model Pricing Demo");
    println!("======================");

    let strikes = vec![80.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 115.0, 120.0, 125.0];
    let (spot, texp, sigma, beta) = (100.0, 1.2, 2.0, 0.5);
    let config = default_configs::standard();

    let market = CevInputs::new(texp, sigma)
        .spot(spot)
        .strike(strikes.clone())
        .beta(beta);
    let calls = price_with_config(&market.clone().cp(1.0), &config)?;
    let puts = price_with_config(&market.clone().cp(-1.0), &config)?;

    println!(
        "\nspot = {}, texp = {}, sigma = {}, beta = {}",
        spot, texp, sigma, beta
    );
    println!("{:<8} {:<12} {:<12} {:<12}", "Strike", "Call", "Put", "Parity gap");
    println!("{}", "-".repeat(48));
    for ((strike, call), put) in strikes.iter().zip(&calls).zip(&puts) {
        let gap = call - put - (spot - strike);
        println!("{:<8.1} {:<12.6} {:<12.6} {:<12.2e}", strike, call, put, gap);
    }

    println!("\nAbsorption probability at zero (spot = 1, texp = 5, sigma = 0.8)");
    println!("{:<8} {:<12}", "Beta", "Mass");
    println!("{}", "-".repeat(22));
    let betas = vec![-0.5, 0.0, 0.25, 0.5, 0.75, 0.9];
    let masses = mass_zero(&CevInputs::new(5.0, 0.8).spot(1.0).beta(betas.clone()))?;
    for (beta, mass) in betas.iter().zip(&masses) {
        println!("{:<8.2} {:<12.6e}", beta, mass);
    }

    Ok(())
}
