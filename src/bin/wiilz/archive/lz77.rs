// archive/lz77.rs from wiilz (c) 2025 NinjaCheetah & Contributors
// https://github.com/NinjaCheetah/wiilz
//
// Code for the LZ77 compression/decompression commands in the wiilz CLI.

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use wiilz::archive::lz77;

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
pub enum Commands {
    /// Compress a file with LZ77 compression (data is stored, not shrunk)
    #[command(alias = "c")]
    Compress {
        /// The path to the file to compress
        input: String,
        /// An optional output name; defaults to <input name>.lz77
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decompress an LZ77-compressed file
    #[command(alias = "d")]
    Decompress {
        /// The path to the file to decompress
        input: String,
        /// An optional output name; defaults to <input name>.out
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the header of an LZ77-compressed file
    Info {
        /// The path to the file to inspect
        input: String,
    }
}

fn resolve_paths(input: &str, output: &Option<String>, default_ext: &str) -> Result<(PathBuf, PathBuf)> {
    let in_path = PathBuf::from(input);
    if !in_path.exists() {
        bail!("Source file \"{}\" could not be found.", in_path.display());
    }
    let out_path = match output {
        Some(output) => PathBuf::from(output),
        None => in_path.with_extension(default_ext),
    };
    if out_path == in_path {
        bail!("Output path \"{}\" would overwrite the input file.", out_path.display());
    }
    Ok((in_path, out_path))
}

pub fn compress_lz77(input: &str, output: &Option<String>) -> Result<()> {
    let (in_path, out_path) = resolve_paths(input, output, "lz77")?;
    let data = fs::read(&in_path)?;
    let compressed = lz77::compress_lz77(&data).with_context(|| format!("Failed to compress \"{}\".", in_path.display()))?;
    fs::write(&out_path, compressed)?;
    println!("Successfully compressed \"{}\" to \"{}\".", in_path.display(), out_path.display());
    Ok(())
}

pub fn decompress_lz77(input: &str, output: &Option<String>) -> Result<()> {
    let (in_path, out_path) = resolve_paths(input, output, "out")?;
    let compressed = fs::read(&in_path)?;
    let decompressed = lz77::decompress_lz77(&compressed).with_context(|| format!("Failed to decompress \"{}\".", in_path.display()))?;
    fs::write(&out_path, decompressed)?;
    println!("Successfully decompressed \"{}\" to \"{}\".", in_path.display(), out_path.display());
    Ok(())
}

pub fn info(input: &str) -> Result<()> {
    let in_path = Path::new(input);
    if !in_path.exists() {
        bail!("Compressed file \"{}\" could not be found.", in_path.display());
    }
    let compressed = fs::read(in_path)?;
    let header = lz77::Header::from_bytes(&compressed).with_context(|| "The provided file does not have a valid LZ77 header.")?;
    println!("LZ77 Info");
    println!("  Compression Type: {:#04x}", header.format_tag());
    println!("  Decompressed Size: {} bytes", header.uncompressed_size());
    println!("  Stored Size: {} bytes", compressed.len());
    if header.uncompressed_size() > 0 {
        let ratio = compressed.len() as f64 / header.uncompressed_size() as f64 * 100.0;
        println!("  Ratio: {:.2}%", ratio);
    }
    Ok(())
}
