use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Library crates whose docs are built; xtask itself is left out
const CRATES: &[&str] = &["slm-specs", "slm-hologram", "slm-testing"];

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("doc").arg("--no-deps");
    for name in CRATES {
        cmd.args(["-p", name]);
    }
    // Document the serde derives on the device templates too
    cmd.args(["--features", "slm-specs/std,slm-specs/serde"]);
    if open {
        cmd.arg("--open");
    }

    let output = cmd.output().context("Failed to build documentation")?;

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    let warnings = String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| line.starts_with("warning"))
        .count();
    let summary = format!(
        "✓ Documentation for {} crates built in {:.2}s",
        CRATES.len(),
        start.elapsed().as_secs_f64()
    );
    if warnings == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", format!("{summary} ({warnings} warnings)").yellow());
    }

    if !open {
        println!();
        println!(
            "   {}",
            "Open target/doc/slm_hologram/index.html in your browser".dimmed()
        );
        println!("   {}", "Or run 'cargo xtask doc --open'".dimmed());
    }

    println!();

    Ok(())
}
