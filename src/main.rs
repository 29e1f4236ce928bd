use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "psd2json")]
#[command(version, about = "Extract PSD files into image trees plus a JSON sidecar")]
#[command(long_about = "Extract PSD files into image trees plus a JSON sidecar\n\n\
    The sidecar data.json is pretty-printed by default with indentation.\n\n\
    For regular .psd files:\n  \
    psd2json input.psd out-dir [--compact] [-v]\n\n\
    For ZIP files (extracts all and converts all .psd files inside):\n  \
    psd2json input.zip extract-dir [--compact] [-v]")]
struct Cli {
    /// Input .psd or .zip file path
    input: PathBuf,

    /// Directory receiving the extracted files and data.json sidecar
    target_dir: PathBuf,

    /// Compact JSON sidecar (default is pretty-printed with indentation)
    #[arg(long)]
    compact: bool,

    /// Verbose output for debugging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("Reading input file: {}", cli.input.display());
    }

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("Failed to read input file: {}", cli.input.display()))?;

    if cli.verbose {
        eprintln!("File size: {} bytes", bytes.len());
    }

    if psd2json::decoder::is_zip_container(&bytes) {
        // ZIP batch mode: refuse to mix with previous runs
        if cli.target_dir.exists() {
            bail!(
                "Extraction directory already exists: {}\nPlease remove it first",
                cli.target_dir.display()
            );
        }

        handle_zip_mode(&bytes, &cli.target_dir, cli.compact, cli.verbose)?;
    } else {
        if !psd2json::decoder::is_psd_file(&bytes) {
            bail!(
                "Input is neither a PSD nor a ZIP archive: {}",
                cli.input.display()
            );
        }

        extract_one(&bytes, &cli.target_dir, cli.compact, cli.verbose)
            .with_context(|| format!("Failed to extract: {}", cli.input.display()))?;

        if cli.verbose {
            eprintln!("Done!");
        }
    }

    Ok(())
}

/// Extract a single PSD into `target_dir` and write the data.json sidecar
fn extract_one(bytes: &[u8], target_dir: &PathBuf, compact: bool, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Extracting into: {}", target_dir.display());
    }

    let json = psd2json::extract(bytes, target_dir)?;

    if verbose {
        eprintln!("Wrote {} layer image(s)", count_layer_images(&json));
    }

    // Format the sidecar (pretty by default, compact if flag is set)
    let output = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };

    let sidecar_path = target_dir.join("data.json");
    fs::write(&sidecar_path, output)
        .with_context(|| format!("Failed to write sidecar: {}", sidecar_path.display()))?;

    if verbose {
        eprintln!("Wrote sidecar: {}", sidecar_path.display());
    }

    Ok(())
}

/// Handle ZIP batch mode: extract the archive and convert all .psd files found
fn handle_zip_mode(
    zip_bytes: &[u8],
    extract_dir: &PathBuf,
    compact: bool,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("ZIP file detected - extracting to: {}", extract_dir.display());
    }

    psd2json::decoder::extract_zip_to_directory(zip_bytes, extract_dir)
        .context("Failed to extract ZIP file")?;

    if verbose {
        eprintln!("ZIP extracted successfully");
        eprintln!("Searching for .psd files...");
    }

    let psd_files = find_psd_files(extract_dir)?;

    if psd_files.is_empty() {
        bail!("No .psd files found in ZIP archive");
    }

    let file_count = psd_files.len();

    if verbose {
        eprintln!("Found {} .psd file(s)", file_count);
    }

    for psd_path in psd_files {
        let relative_path = psd_path.strip_prefix(extract_dir).unwrap_or(&psd_path);

        if verbose {
            eprintln!("Extracting: {}", relative_path.display());
        }

        let psd_bytes = fs::read(&psd_path)
            .with_context(|| format!("Failed to read .psd file: {}", psd_path.display()))?;

        // Output directory: sibling of the .psd, named after its stem
        let target_dir = psd_path.with_extension("");

        extract_one(&psd_bytes, &target_dir, compact, verbose)
            .with_context(|| format!("Failed to extract: {}", psd_path.display()))?;

        if verbose {
            eprintln!(
                "  → {}",
                target_dir
                    .strip_prefix(extract_dir)
                    .unwrap_or(&target_dir)
                    .display()
            );
        }
    }

    if verbose {
        eprintln!("Done! Extracted {} file(s)", file_count);
    }

    Ok(())
}

/// Find all .psd files under a directory, sorted by path
fn find_psd_files(dir: &PathBuf) -> Result<Vec<PathBuf>> {
    let mut psd_files = Vec::new();
    let mut pending = vec![dir.clone()];

    while let Some(current) = pending.pop() {
        if !current.is_dir() {
            continue;
        }

        for entry in fs::read_dir(&current)? {
            let path = entry?.path();

            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "psd") {
                psd_files.push(path);
            }
        }
    }

    // Work-stack order is not stable, sort for deterministic batch output
    psd_files.sort();
    Ok(psd_files)
}

/// Count nodes in the sidecar tree that had a canvas written for them
fn count_layer_images(json: &JsonValue) -> usize {
    fn count_nodes(nodes: &[JsonValue]) -> usize {
        let mut total = 0;
        for node in nodes {
            if node.get("canvasUrl").is_some() {
                total += 1;
            }
            if let Some(children) = node.get("children").and_then(|c| c.as_array()) {
                total += count_nodes(children);
            }
        }
        total
    }

    json.get("children")
        .and_then(|c| c.as_array())
        .map(|nodes| count_nodes(nodes))
        .unwrap_or(0)
}
