use anyhow::Result;
use log::debug;
use lv2probe::{
    checks::file_params,
    cli::Cli,
    config::{Config, Settings},
    printer::Printer,
    utils::ProcessRunner,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the report owns stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse_for(file_params::NAME, file_params::ABOUT);
    // Defaults < .lv2proberc < environment < flags
    let cfg = Config::load();
    debug!("config file: {}", cfg.config_path.display());
    let settings = Settings::resolve(&args, &cfg, file_params::DEFAULT_TIMEOUT);
    debug!("{settings:?}");

    let runner = ProcessRunner::new(settings.timeout);
    let mut printer = Printer::stdout(settings.color);
    // Missing plugins and tool failures are findings; only a stdout write error fails
    file_params::run(&runner, &settings, &mut printer).await
}
