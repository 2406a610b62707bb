//! Batch Producer
//!
//! Generates sample transaction batches for exercising the screening
//! engine. Records go to stdout in the engine's input format; progress
//! logs go to stderr so the output can be piped straight into the engine.

use anyhow::Result;
use rand::Rng;
use std::io::{self, Write};
use tracing::info;

/// Generator for sample transaction records
struct BatchGenerator {
    rng: rand::rngs::ThreadRng,
    transaction_counter: u64,
}

impl BatchGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            transaction_counter: 0,
        }
    }

    /// Generate a benign record
    fn generate_legitimate(&mut self) -> String {
        self.transaction_counter += 1;
        let amount: f64 = self.rng.gen_range(10.0..500.0);
        let description = self.random_choice(&[
            "monthly rent payment",
            "grocery store",
            "wire transfer",
            "utility bill",
            "salary deposit",
        ]);
        format!(
            "acct_{:06},{:.2},{}",
            self.transaction_counter, amount, description
        )
    }

    /// Generate a record the engine should flag
    fn generate_suspicious(&mut self) -> String {
        match self.rng.gen_range(0..3) {
            // Blacklisted identifier
            0 => {
                let id = self.random_choice(&["9999", "1001"]);
                let amount: f64 = self.rng.gen_range(1000.0..10000.0);
                format!("{},{:.2},large withdrawal", id, amount)
            }
            // Repeated identifier: four records pushes it over the threshold
            1 => {
                self.transaction_counter += 1;
                let id = format!("burst_{:04}", self.transaction_counter);
                (0..4)
                    .map(|i| format!("{},{:.2},purchase {}", id, 25.0 + i as f64, i + 1))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            // Watch keyword in the description
            _ => {
                self.transaction_counter += 1;
                let description = self.random_choice(&[
                    "invest in crypto now",
                    "offshore account setup",
                    "sports bet winnings, paid out",
                ]);
                let amount: f64 = self.rng.gen_range(50.0..2000.0);
                format!(
                    "acct_{:06},{:.2},{}",
                    self.transaction_counter, amount, description
                )
            }
        }
    }

    /// Generate a line the engine should drop or repair
    fn generate_degenerate(&mut self) -> String {
        match self.rng.gen_range(0..2) {
            0 => "justanid".to_string(),
            _ => {
                self.transaction_counter += 1;
                format!("acct_{:06},notanumber,gift", self.transaction_counter)
            }
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

fn main() -> Result<()> {
    // Initialize logging on stderr; stdout carries the batch
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("batch_producer=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100);
    let suspicious_rate: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0.1);
    let degenerate_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.02);

    info!(
        count = count,
        suspicious_rate = suspicious_rate,
        degenerate_rate = degenerate_rate,
        "Generating sample batch"
    );

    let mut generator = BatchGenerator::new();
    let mut rng = rand::thread_rng();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut legitimate_count = 0u64;
    let mut suspicious_count = 0u64;
    let mut degenerate_count = 0u64;

    for _ in 0..count {
        let line = if rng.gen_bool(degenerate_rate) {
            degenerate_count += 1;
            generator.generate_degenerate()
        } else if rng.gen_bool(suspicious_rate) {
            suspicious_count += 1;
            generator.generate_suspicious()
        } else {
            legitimate_count += 1;
            generator.generate_legitimate()
        };

        writeln!(out, "{}", line)?;
    }

    info!(
        "Completed! Generated {} entries ({} legitimate, {} suspicious, {} degenerate)",
        count, legitimate_count, suspicious_count, degenerate_count
    );

    Ok(())
}
