//! Command line entry point.
//!
//! Stands in for the host application: loads its settings file, then prints
//! the menu styles as CSS or TOML, or resets them and saves the file.

use quick_reply_style::models::config::{AppConfig, DEFAULT_CONFIG_PATH};
use quick_reply_style::models::settings::HostSettings;
use quick_reply_style::render::{DocumentStyle, LiveStyleApplier};
use quick_reply_style::StyleModel;
use std::path::PathBuf;
use std::process::ExitCode;

enum Command {
    Css,
    Toml,
    Reset,
}

struct Args {
    command: Command,
    config_path: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut command = Command::Css;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "css" => command = Command::Css,
            "toml" => command = Command::Toml,
            "reset" => command = Command::Reset,
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                config_path = PathBuf::from(path);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Args {
        command,
        config_path,
    })
}

fn run(args: Args) -> Result<(), String> {
    let config = AppConfig::load_or_default(&args.config_path);
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    log::info!("MAIN: extension {:?}", config.extension_name);
    let mut settings = HostSettings::load(&config.settings_path)?;

    match args.command {
        Command::Css => {
            let model = settings
                .menu_styles(&config.extension_name)
                .map(StyleModel::load)
                .unwrap_or_default();
            let mut document = DocumentStyle::with_menu();
            LiveStyleApplier::render(&model, &mut document);
            print!("{}", document.to_css());
        }
        Command::Toml => {
            let model = settings
                .menu_styles(&config.extension_name)
                .map(StyleModel::load)
                .unwrap_or_default();
            let content = toml::to_string_pretty(&model).map_err(|e| e.to_string())?;
            print!("{}", content);
        }
        Command::Reset => {
            StyleModel::reset(settings.menu_styles_mut(&config.extension_name));
            settings.save(&config.settings_path)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: quick-reply-style [css|toml|reset] [--config PATH]");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
