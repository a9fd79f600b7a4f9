//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - exact statevector quantum circuit simulation",
        style("Entangle").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  entangle-ir     Circuit model, gates and diagrams");
    println!("  entangle-sim    Statevector simulator and shot sampling");
    println!("  entangle-demos  Textbook protocols");
    println!("  entangle-cli    Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/entangle-rs/entangle").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
