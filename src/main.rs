use gbl_bot::adb::{AdbShell, check_adb_status, wait_for_device};
use gbl_bot::args::Args;
use gbl_bot::bot::{Bot, BotConfig, DecisionPolicy, RunOutcome, TemplateLibrary, shutdown_channel};
use std::time::Duration;

const DEVICE_WAIT: Duration = Duration::from_secs(30);

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    init_logging(args.verbose);

    let rt = tokio::runtime::Runtime::new().unwrap();
    let code = rt.block_on(run(args));
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .parse_default_env()
        .init();
}

async fn run(args: Args) -> i32 {
    if !args.skip_adb_check {
        let (ready, message) = check_adb_status().await;
        if ready {
            log::info!("{message}");
        } else {
            log::warn!("{message}");
            log::info!(
                "Waiting up to {} seconds for a device...",
                DEVICE_WAIT.as_secs()
            );
            if !wait_for_device(DEVICE_WAIT).await {
                log::error!(
                    "No device became available. Connect a phone with USB debugging enabled and retry."
                );
                return 1;
            }
        }
    }

    let mut config = BotConfig::default();
    if let Some(dir) = args.template_dir {
        config.template_dir = dir;
    }

    let library = match TemplateLibrary::load(&config.template_dir) {
        Ok(library) => library,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            return 1;
        }
    };
    log::info!(
        "Loaded {} template(s) from {:?}",
        library.len(),
        config.template_dir
    );

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let mut bot = Bot::new(
        AdbShell::new(),
        library,
        DecisionPolicy::default(),
        config,
        shutdown_rx,
    );

    match bot.run().await {
        Ok(RunOutcome::Interrupted) => {
            // The waiting-for-device dots end without a newline
            println!();
            println!("Exiting program...");
            0
        }
        Ok(RunOutcome::MaxGamesReached) => 0,
        Err(e) => {
            log::error!("Bot stopped with an error: {e}");
            1
        }
    }
}
