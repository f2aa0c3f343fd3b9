//! Progress reporting for long-running commands

use std::io::{self, Write};

/// Line-rewriting progress output on stderr
pub struct ProgressReporter;

impl ProgressReporter {
    pub fn update(done: usize, total: usize) {
        eprint!("\rEmbedding chunks {}/{}          ", done, total);
        io::stderr().flush().ok();
    }

    pub fn finish(total: usize) {
        eprintln!("\rEmbedded {} chunks              ", total);
    }
}
