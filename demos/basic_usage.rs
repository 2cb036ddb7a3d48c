// ============================================================================
// Basic Usage Example
// ============================================================================

use huge_amount::prelude::*;
use huge_amount::utils::init_logging;

fn main() {
    init_logging();

    println!("=== Huge Amount Example ===\n");

    // Parse player input under the strict preset
    let options = ParseOptions::player_input();
    println!("Parsing player input...");
    for input in ["1_000", "3,500", "2.5qa", "1 million", "12.99", "-1", "abc", "5 milion", "1e400"] {
        match parse_with(input, &options) {
            Ok(parsed) => println!(
                "  {:>12} -> {} ({})",
                input,
                format_exact(&parsed.value),
                format_short(&parsed.value)
            ),
            Err(error) => println!("  {:>12} -> [{}] {}", input, error.kind, error),
        }
    }

    // A wallet moving through the suffix table
    println!("\nGrowing a wallet...");
    let mut balance = Amount::from_integer(750);
    let multiplier = Amount::from_integer(1_000);
    let config = DisplayConfig::coins();
    while !balance.is_symbolic() {
        println!(
            "  {:<28} {}",
            format_balance(&balance, &config),
            format_full(&balance)
        );
        balance = match balance.checked_mul(&multiplier) {
            Ok(next) => next,
            Err(error) => {
                println!("  stopped: {}", error);
                break;
            },
        };
        // Skip ahead to the top of the table
        if balance.power_estimate().is_some_and(|p| p > 40.0 && p < 300.0) {
            balance = parse("9.5e300").map(|p| p.value).unwrap_or(balance);
        }
    }
    println!("  past the ceiling: {}", format_short(&balance));

    // Admin-only symbolic magnitudes
    println!("\nSymbolic magnitudes...");
    let mut magnitudes: Vec<Amount> = ["infinity", "10^^3", "googolplex", "1e500", "4 × 10^^3"]
        .iter()
        .filter_map(|input| parse_with(input, &ParseOptions::admin()).ok())
        .map(|parsed| parsed.value)
        .collect();
    magnitudes.sort();
    for magnitude in &magnitudes {
        println!("  {:<12} {}", format_short(magnitude), format_debug(magnitude));
    }

    // Percentages
    println!("\nRates...");
    println!("  house edge: {}", format_basis_points(250));
    if let Ok(ratio) = "0.125".parse::<ExactDecimal>() {
        println!("  win chance: {}", format_percent(&ratio, 2));
    }

    println!("\n=== Example Complete ===");
}
