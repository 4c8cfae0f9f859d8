use anyhow::{Context, Result};

use ecg_analysis::filter::BandpassDesign;
use ecg_analysis::pipeline::DIAGNOSTIC_ORDERS;

/// Print bandpass coefficients for one order, or for every diagnostic order
pub fn run(order: Option<usize>, low: f64, high: f64, rate: f64) -> Result<()> {
    let orders = order.map_or_else(|| DIAGNOSTIC_ORDERS.to_vec(), |o| vec![o]);

    for order in orders {
        let design = BandpassDesign::new(order, low, high, rate);
        let coeffs = design
            .coefficients()
            .with_context(|| format!("Failed to design order {} bandpass", order))?;

        println!("Butterworth bandpass, order {} ({}-{} Hz @ {} Hz)", order, low, high, rate);
        println!("  stable: {}", coeffs.is_stable());
        println!("  b = {:?}", coeffs.feedforward());
        println!("  a = {:?}", coeffs.feedback());
        println!(
            "  |H| at {} Hz: {:.6}, at {} Hz: {:.6}",
            low,
            coeffs.magnitude_at(low, rate),
            high,
            coeffs.magnitude_at(high, rate)
        );
        println!();
    }

    Ok(())
}
