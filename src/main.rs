mod cli;
mod config;
mod contact;
mod content;
mod controller;
mod error;
mod launcher;
mod logging;
mod nav;
mod page;
mod reveal;
mod view;

use clap::Parser;
use cli::Cli;
use config::{RcConfig, RcLoader};
use content::PROFILE_PICTURE;
use controller::AppController;
use launcher::DesktopLauncher;
use page::PageLayout;
use reveal::RegionId;
use tracing::info;

fn load_config(cli: &Cli) -> error::Result<RcConfig> {
    let mut config = match &cli.config {
        Some(path) => RcLoader::load_from(path)?,
        None => RcLoader::load_config(),
    };
    if let Some(dir) = &cli.asset_dir {
        config.asset_dir = Some(dir.clone());
    }
    Ok(config)
}

/// The page with every region already revealed, as plain text.
fn print_page(config: &RcConfig, width: u16) {
    let profile = PROFILE_PICTURE.resolve(config.asset_dir.as_deref());
    let layout = PageLayout::build(width, &profile);
    let full_text = |region: RegionId| match region {
        RegionId::Hero => content::HERO_FULL_TEXT.to_string(),
        RegionId::About => content::ABOUT_FULL_TEXT.to_string(),
    };
    for line in layout.to_plain_lines(full_text, |_| String::new()) {
        println!("{line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", RcLoader::generate_sample_rc());
        return Ok(());
    }

    if cli.print {
        logging::init_stderr()?;
        let config = load_config(&cli)?;
        print_page(&config, cli.width);
        return Ok(());
    }

    // The full-screen UI owns the terminal, so logs only go to a file
    if let Some(path) = &cli.log_file {
        logging::init_file(path)?;
    }

    let config = load_config(&cli)?;
    info!(?config, "starting portfolio");

    let controller = AppController::new(&config, Box::new(DesktopLauncher::new()))?;
    controller.run()?;
    Ok(())
}
