//! QAE Demo Suite
//!
//! Console helpers shared by the demo binaries, and a seeded source of
//! candidate angles standing in for an external optimizer.

use console::style;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use qae_ir::Circuit;

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print a plain gate listing, one gate per line.
pub fn print_gates(circuit: &Circuit) {
    for (i, gate) in circuit.gates().iter().enumerate() {
        println!("  {:>3}  {gate}", style(i).dim());
    }
}

/// `count` angles drawn uniformly from `[-π, π)`, reproducible for a seed.
pub fn random_angles(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(-PI..PI)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_angles_seeded() {
        let a = random_angles(24, 7);
        let b = random_angles(24, 7);
        assert_eq!(a.len(), 24);
        assert_eq!(a, b);
        assert!(a.iter().all(|x| (-PI..PI).contains(x)));
        assert_ne!(a, random_angles(24, 8));
    }

    #[test]
    fn test_random_angles_empty() {
        assert!(random_angles(0, 1).is_empty());
    }
}
