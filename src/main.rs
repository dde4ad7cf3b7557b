use anyhow::Result;
use console::style;
use log::{info, warn};
use video_thumbnail_studio::component::ThumbnailStudio;
use video_thumbnail_studio::config::Config;
use video_thumbnail_studio::signal::setup_shutdown_signal;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shutdown_signal = setup_shutdown_signal();
    let config = Config::new()?;

    let mut studio = ThumbnailStudio::new(config, shutdown_signal);

    match studio.run() {
        Ok(()) => {
            println!("\n{}", style("完成").green().bold());
            info!("Program exited normally");
        }
        Err(e) => {
            warn!("Program error: {e:#}");
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            std::process::exit(1);
        }
    }

    Ok(())
}
