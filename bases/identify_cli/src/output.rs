// bases/identify_cli/src/output.rs
use std::io::{self, Write};
use std::path::Path;

use match_session::ResultSet;

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Result lines go to stdout and nowhere else on the terminal
    pub fn print_results(&self, results: &ResultSet) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_lines(&mut handle, results)?;
        handle.flush()
    }

    pub fn save_results(&self, path: &Path, results: &ResultSet) -> io::Result<()> {
        let mut file = io::BufWriter::new(std::fs::File::create(path)?);
        write_lines(&mut file, results)?;
        file.flush()?;
        tracing::info!("Wrote {} line(s) to {}", results.len(), path.display());
        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}

fn write_lines(writer: &mut impl Write, results: &ResultSet) -> io::Result<()> {
    for line in results.lines() {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
