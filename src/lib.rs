pub mod color;
pub mod config;
pub mod direction;
pub mod generator;
pub mod postprocess;
pub mod preflight;
pub mod preset;
pub mod rule;
pub mod rules;
pub mod scanner;
pub mod selector;
pub mod theme;
pub mod values;
pub mod variants;

use crate::config::{Config, ConfigError};
use crate::generator::{generate, GeneratorConfig};
use crate::preset::{from_config, Preset};
use crate::scanner::{scan_globs, ScanError, ScanGlobOptions};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan {
        inputs: Vec<String>,
        ignore: Vec<String>,
        config: Option<String>,
    },
    Build {
        inputs: Vec<String>,
        out: Option<String>,
        minify: bool,
        preflights: bool,
        config: Option<String>,
        ignore: Vec<String>,
    },
    Help,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown flag for {command}: {flag}")]
    UnknownFlag { command: &'static str, flag: String },
    #[error("{command} requires a value for {flag}")]
    MissingValue {
        command: &'static str,
        flag: &'static str,
    },
    #[error("{0} requires at least one path or glob pattern")]
    MissingInputs(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Scan {
            inputs,
            ignore,
            config,
        } => run_scan(inputs, ignore, config),
        Command::Build {
            inputs,
            out,
            minify,
            preflights,
            config,
            ignore,
        } => run_build(
            inputs,
            BuildOptions {
                out,
                minify,
                preflights,
                config,
                ignore,
            },
        ),
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

pub fn run_from_env() -> Result<(), CliError> {
    let command = parse_args(env::args().skip(1))?;
    run(command)
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    let Some(cmd) = iter.next() else {
        return Ok(Command::Help);
    };

    match cmd.as_str() {
        "scan" => parse_scan_args(iter.collect()),
        "build" => parse_build_args(iter.collect()),
        "-h" | "--help" | "help" => Ok(Command::Help),
        _ => Err(CliError::UnknownCommand(cmd)),
    }
}

fn flag_value(
    args: &[String],
    idx: &mut usize,
    command: &'static str,
    flag: &'static str,
) -> Result<String, CliError> {
    *idx += 1;
    args.get(*idx)
        .cloned()
        .ok_or(CliError::MissingValue { command, flag })
}

fn parse_build_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut inputs = Vec::new();
    let mut out = None;
    let mut minify = false;
    let mut preflights = true;
    let mut config = None;
    let mut ignore = Vec::new();
    let mut idx = 0;

    while idx < args.len() {
        match args[idx].as_str() {
            "--out" | "--output" | "-o" => {
                out = Some(flag_value(&args, &mut idx, "build", "--output")?);
            }
            "--config" | "-c" => {
                config = Some(flag_value(&args, &mut idx, "build", "--config")?);
            }
            "--ignore" | "-I" => {
                ignore.push(flag_value(&args, &mut idx, "build", "--ignore")?);
            }
            "--minify" => minify = true,
            "--no-preflight" => preflights = false,
            flag if flag.starts_with("--") => {
                return Err(CliError::UnknownFlag {
                    command: "build",
                    flag: flag.to_string(),
                });
            }
            value => inputs.push(value.to_string()),
        }
        idx += 1;
    }

    if inputs.is_empty() {
        return Err(CliError::MissingInputs("build"));
    }

    Ok(Command::Build {
        inputs,
        out,
        minify,
        preflights,
        config,
        ignore,
    })
}

fn parse_scan_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut inputs = Vec::new();
    let mut ignore = Vec::new();
    let mut config = None;
    let mut idx = 0;

    while idx < args.len() {
        match args[idx].as_str() {
            "--ignore" | "-i" | "-I" => {
                ignore.push(flag_value(&args, &mut idx, "scan", "--ignore")?);
            }
            "--config" | "-c" => {
                config = Some(flag_value(&args, &mut idx, "scan", "--config")?);
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::UnknownFlag {
                    command: "scan",
                    flag: flag.to_string(),
                });
            }
            value => inputs.push(value.to_string()),
        }
        idx += 1;
    }

    if inputs.is_empty() {
        return Err(CliError::MissingInputs("scan"));
    }

    Ok(Command::Scan {
        inputs,
        ignore,
        config,
    })
}

fn load_preset(config_path: Option<&str>) -> Result<Preset, CliError> {
    let config = match config_path {
        Some(path) => config::load(Path::new(path))?,
        None => Config::default(),
    };
    Ok(from_config(&config))
}

fn run_scan(
    inputs: Vec<String>,
    ignore: Vec<String>,
    config: Option<String>,
) -> Result<(), CliError> {
    let preset = load_preset(config.as_deref())?;
    let mut result = scan_globs(
        &inputs,
        &ignore,
        &ScanGlobOptions::default(),
        preset.extractor,
    )?;

    result.tokens.sort();
    for token in &result.tokens {
        println!("{}", token);
    }

    eprintln!(
        "scanned {} files, found {} tokens",
        result.files_scanned,
        result.tokens.len()
    );

    Ok(())
}

struct BuildOptions {
    out: Option<String>,
    minify: bool,
    preflights: bool,
    config: Option<String>,
    ignore: Vec<String>,
}

fn run_build(inputs: Vec<String>, options: BuildOptions) -> Result<(), CliError> {
    let preset = load_preset(options.config.as_deref())?;

    let mut ignore = options.ignore;
    if let Some(out_path) = options.out.as_ref() {
        ignore.push(out_path.clone());
    }

    let scan = scan_globs(&inputs, &ignore, &ScanGlobOptions::default(), preset.extractor)?;
    let generator_config = GeneratorConfig {
        minify: options.minify,
        preflights: options.preflights,
    };
    let result = generate(&scan.tokens, &preset, &generator_config);

    match options.out {
        Some(out) => {
            let path = PathBuf::from(out);
            write_output(&path, &result.css)?;
            info!(path = %path.display(), "wrote css");
        }
        None => println!("{}", result.css),
    }

    eprintln!(
        "scanned {} files, generated {} rules",
        scan.files_scanned, result.class_count
    );

    Ok(())
}

fn write_output(path: &Path, css: &str) -> Result<(), CliError> {
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, css).map_err(write_error)
}

fn print_help() {
    println!("mpcss");
    println!();
    println!("USAGE:");
    println!("  mpcss scan [--config <path>] [--ignore <glob>] <glob...>");
    println!(
        "  mpcss build [--output <path>] [--minify] [--no-preflight] [--config <path>] [--ignore <glob>] <glob...>"
    );
    println!();
    println!("EXAMPLES:");
    println!("  mpcss scan \"pages/**/*.{{wxml,js}}\"");
    println!("  mpcss build -o dist/uno.wxss \"pages/**/*.wxml\"");
    println!("  mpcss build -c mpcss.toml --minify \"**/*.wxml\"");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_args_prints_help() {
        assert_eq!(parse_args(Vec::new()).expect("parses"), Command::Help);
        assert_eq!(parse_args(args(&["--help"])).expect("parses"), Command::Help);
    }

    #[test]
    fn parse_build_flags() {
        let command = parse_args(args(&[
            "build",
            "-o",
            "dist/app.wxss",
            "--minify",
            "--no-preflight",
            "-c",
            "mpcss.toml",
            "-I",
            "**/miniprogram_npm/**",
            "pages/**/*.wxml",
        ]))
        .expect("build args should parse");

        assert_eq!(
            command,
            Command::Build {
                inputs: args(&["pages/**/*.wxml"]),
                out: Some("dist/app.wxss".to_string()),
                minify: true,
                preflights: false,
                config: Some("mpcss.toml".to_string()),
                ignore: args(&["**/miniprogram_npm/**"]),
            }
        );
    }

    #[test]
    fn parse_scan_flags() {
        let command = parse_args(args(&["scan", "-i", "dist/**", "**/*.wxml"]))
            .expect("scan args should parse");
        assert_eq!(
            command,
            Command::Scan {
                inputs: args(&["**/*.wxml"]),
                ignore: args(&["dist/**"]),
                config: None,
            }
        );
    }

    #[test]
    fn argument_errors() {
        assert!(matches!(
            parse_args(args(&["watch"])),
            Err(CliError::UnknownCommand(cmd)) if cmd == "watch"
        ));
        assert!(matches!(
            parse_args(args(&["build", "**/*.wxml", "-o"])),
            Err(CliError::MissingValue {
                command: "build",
                flag: "--output"
            })
        ));
        assert!(matches!(
            parse_args(args(&["scan"])),
            Err(CliError::MissingInputs("scan"))
        ));
        assert!(matches!(
            parse_args(args(&["build", "--watch", "x"])),
            Err(CliError::UnknownFlag { .. })
        ));
    }

    #[test]
    fn missing_config_surfaces_as_config_error() {
        let err = load_preset(Some("/nonexistent/mpcss.toml"))
            .err()
            .expect("loading a missing config fails");
        assert!(matches!(err, CliError::Config(ConfigError::Read { .. })));
        assert!(err.to_string().starts_with("failed to read config"));
    }

    #[test]
    fn write_output_creates_parent_directories() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let base = std::env::temp_dir().join(format!("mpcss_write_{}", nanos));
        let path = base.join("dist/app.wxss");
        write_output(&path, ".p-4{padding:8rpx}").expect("write succeeds");
        assert_eq!(
            fs::read_to_string(&path).expect("output is readable"),
            ".p-4{padding:8rpx}"
        );
        let _ = fs::remove_dir_all(&base);
    }
}
