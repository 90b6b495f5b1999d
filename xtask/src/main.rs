//! Build automation for Tank Battle
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM and a page to host it
//!   cargo xtask package-itch    # Zip the web build for itch.io upload

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const WASM_NAME: &str = "tank-battle.wasm";
const MQ_JS_URL: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";
const ITCH_ZIP: &str = "tank-battle-itch.zip";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Tank Battle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM into dist/web with its host page
    BuildWeb {
        /// Mark the page title as a dev build
        #[arg(long)]
        dev: bool,
    },
    /// Zip dist/web for itch.io
    PackageItch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageItch => package_itch(),
    }
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the project root")
}

/// Run a command and fail on a non-zero exit
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("failed to execute {:?}", cmd.get_program()))?;
    if !status.success() {
        anyhow::bail!("{:?} failed with status: {}", cmd.get_program(), status);
    }
    Ok(())
}

fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Host page for the macroquad canvas
fn index_html(dev: bool) -> String {
    let title = if dev { "[DEV] Tank Battle" } else { "Tank Battle" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        html, body {{ margin: 0; padding: 0; height: 100%; background: #000; overflow: hidden; }}
        canvas {{ display: block; margin: 0 auto; }}
    </style>
</head>
<body>
    <canvas id="glcanvas" tabindex="1" width="640" height="512"></canvas>
    <script src="mq_js_bundle.js"></script>
    <script>load("{WASM_NAME}");</script>
</body>
</html>
"#
    )
}

fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown"]),
    )?;

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = root.join("target/wasm32-unknown-unknown/release").join(WASM_NAME);
    std::fs::copy(&wasm, dist.join(WASM_NAME))
        .with_context(|| format!("missing build output {}", wasm.display()))?;
    std::fs::write(dist.join("index.html"), index_html(dev))?;

    download_file(MQ_JS_URL, &dist.join("mq_js_bundle.js"))?;

    println!("Web build complete: dist/web/");
    Ok(())
}

fn package_itch() -> Result<()> {
    build_web(false)?;

    let dist = project_root()?.join("dist");
    let zip_path = dist.join(ITCH_ZIP);
    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating itch.io zip...");
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .args(["-r", &format!("../{}", ITCH_ZIP), "."]),
    )?;

    println!("itch.io package ready: dist/{}", ITCH_ZIP);
    Ok(())
}
