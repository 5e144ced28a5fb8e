use crate::output::MatchResult;
use crate::CrawlError;
use std::io::Write;
use std::path::Path;

/// Writes results as a JSON array, to a file or to stdout
///
/// # Arguments
///
/// * `results` - The collected matches
/// * `path` - Destination file; `None` writes to stdout
pub fn write_results(results: &[MatchResult], path: Option<&Path>) -> Result<(), CrawlError> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, results)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            tracing::info!("Wrote {} results to {}", results.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, results)?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Serializes results to a compact JSON string
pub fn results_to_json(results: &[MatchResult]) -> Result<String, CrawlError> {
    Ok(serde_json::to_string(results)?)
}
