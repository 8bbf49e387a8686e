//! Console output helpers.

use colored::Colorize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a section heading.
pub fn heading(label: &str, value: &str) {
    println!();
    println!("{} {}", label.bold(), value.cyan());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("  {}: {}", label.dimmed(), value);
}
