//! Colored status lines for the terminal.

use console::style;

pub fn info(msg: impl AsRef<str>) {
    println!("{} {}", style("•").cyan(), msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    println!("{} {}", style("✓").green(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!("{} {}", style("!").yellow(), style(msg.as_ref()).yellow());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", style("✗").red(), style(msg.as_ref()).red());
}

/// Dim per-item detail line (dropped fetches, overridden paths)
pub fn detail(msg: impl AsRef<str>) {
    println!("  {}", style(msg.as_ref()).dim());
}
