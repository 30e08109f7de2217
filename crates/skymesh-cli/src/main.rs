use std::sync::Arc;

use anyhow::Result;
use skymesh_cli::cli;
use skymesh_cli::logging;
use skymesh_cli::App;
use skymesh_cli::Config;
use skymesh_cli::ConfigKey;
use skymesh_cli::Outcome;
use skymesh_cli::Settings;
use skymesh_core::CommandRunner;
use skymesh_core::ProcessRunner;
use skymesh_term::CrosstermKeys;
use skymesh_term::Drawer;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build().get_matches();

    if matches.get_flag(cli::PRINT_CONFIG_FLAG) {
        println!("{}", Config::serialize_default());
        return Ok(());
    }

    Config::load(&matches).await?;
    let trace = matches.get_flag(cli::DEBUG_FLAG);
    logging::init(
        &Config::get(ConfigKey::LogFile),
        &Config::get(ConfigKey::LogLevel),
        trace,
    )?;
    let settings = Settings::from_config(trace)?;

    std::panic::set_hook(Box::new(|panic_info| {
        skymesh_term::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let canvas = skymesh_term::init_terminal()?;
    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner);
    let mut app = App::new(Drawer::new(canvas), CrosstermKeys::new(), settings, runner);

    let result = app.run().await;
    skymesh_term::restore_terminal()?;

    match result? {
        Outcome::Quit => return Ok(()),
        Outcome::Exit(code) => {
            log::info!("exiting with {}", code);
            std::process::exit(code);
        }
    }
}
