//! One-shot command execution.

use valet::Valet;

/// Runs each line against one fresh lot and prints one response per line.
///
/// Command failures are responses, not process errors, so this never fails.
pub fn run(lines: &[String]) {
    let valet = Valet::new();
    for line in lines {
        println!("{}", valet.execute(line));
    }
}
