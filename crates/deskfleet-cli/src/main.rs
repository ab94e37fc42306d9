// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use deskfleet_api::Client;
use deskfleet_app::AppState;
use runtime::ApiRuntime;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `deskfleet --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_dir = logging::init(config.log_level(), config.log_dir().as_deref())
        .context("set up logging; set [log].level or DESKFLEET_LOG to a valid filter")?;

    let base_url = options
        .base_url
        .clone()
        .unwrap_or_else(|| config.base_url().to_owned());
    let client = Client::new(&base_url, config.timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    info!(
        base_url = client.base_url(),
        log_dir = ?log_dir,
        "deskfleet starting"
    );

    if options.check_only {
        client.ping().with_context(|| {
            format!(
                "reach {base_url} -- if this address is wrong, set [api].base_url or DESKFLEET_API_URL"
            )
        })?;
        println!("ok: {base_url}");
        return Ok(());
    }

    let mut state = AppState::new(config.default_category());
    let mut runtime = ApiRuntime::new(client);
    let result = deskfleet_tui::run_app(&mut state, &mut runtime);
    info!("deskfleet stopped");
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    base_url: Option<String>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        base_url: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--base-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a URL"))?;
                options.base_url = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("deskfleet");
    println!("  --config <path>          Use a specific config path");
    println!("  --base-url <url>         Talk to this API instead of [api].base_url");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and reach the API, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/deskfleet-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                base_url: None,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_reads_base_url() -> Result<()> {
        let options = parse_cli_args(
            vec!["--base-url", "http://inventory.local:9000/api"],
            default_options_path(),
        )?;
        assert_eq!(
            options.base_url.as_deref(),
            Some("http://inventory.local:9000/api")
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--base-url"], default_options_path())
            .expect_err("missing url should fail");
        assert!(error.to_string().contains("--base-url requires a URL"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
