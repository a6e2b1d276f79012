use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use macro_image::alert::BackgroundChoice;
use macro_image::RunOptions;

/// Compose a background color, caption, photo and noir filter into one image.
#[derive(Debug, Parser)]
#[command(name = "macro-image", version, about)]
struct Cli {
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Background color: red, gray, yellow or white.
    #[arg(long)]
    background: Option<BackgroundChoice>,
    /// Caption drawn in the top band.
    #[arg(long)]
    text: Option<String>,
    /// Photo placed below the caption.
    #[arg(long)]
    image: Option<PathBuf>,
    /// Stack the black-and-white preview on top before sharing.
    #[arg(long)]
    filter: bool,
    /// Write the result to this PNG instead of the share directory.
    #[arg(long, short, conflicts_with = "clipboard")]
    output: Option<PathBuf>,
    /// Copy the result to the Wayland clipboard.
    #[arg(long)]
    clipboard: bool,
    /// TrueType/OpenType font for the caption.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Show alerts as desktop notifications.
    #[arg(long)]
    notify: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            width: cli.width,
            height: cli.height,
            font: cli.font,
            background: cli.background,
            text: cli.text,
            image: cli.image,
            filter: cli.filter,
            output: cli.output,
            clipboard: cli.clipboard,
            notify: cli.notify,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let receipt = macro_image::run(cli.into()).context("macro image session failed")?;
    match receipt {
        Some(receipt) => println!("{receipt}"),
        None => println!("nothing to share"),
    }
    Ok(())
}
