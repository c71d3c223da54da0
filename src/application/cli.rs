use std::env;
use std::io;
use std::path;
use std::process;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::chat;
use super::render::render_analysis;
use super::render::render_open_analysis;
use super::render::render_record_line;
use super::render::render_record_list;
use super::render::EMPTY_HISTORY_TEXT;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::ParsedAnalysis;
use crate::domain::services::AnalysisSession;
use crate::domain::services::ConversationStore;
use crate::domain::services::HistoryBrowser;
use crate::domain::services::OpenAnalysis;
use crate::domain::services::SessionState;
use crate::infrastructure::backends::api::ApiBackend;

/// Directory the JSON debug log is written to when `RUST_LOG` mentions
/// symptocheck.
pub fn debug_log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("SYMPTOCHECK_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("symptocheck");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    process::exit(0);
}

fn print_parsed(parsed: &ParsedAnalysis, raw: bool) {
    if raw {
        println!("{}", parsed.to_markdown());
    } else {
        println!("{}", render_analysis(parsed));
    }
}

fn backend_from_config(config: &Config) -> BackendBox {
    return Arc::new(ApiBackend::from_config(config));
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default_value(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn run_diagnose(config: &Config, matches: &ArgMatches) -> Result<()> {
    let symptoms = matches
        .get_many::<String>("symptoms")
        .map(|values| return values.cloned().collect::<Vec<String>>().join(" "))
        .unwrap_or_default();
    let raw = matches.get_flag("raw");

    let session = AnalysisSession::new(backend_from_config(config));
    session.submit(&symptoms).await;

    match session.state() {
        SessionState::Done(parsed) => {
            print_parsed(&parsed, raw);
        }
        SessionState::Failed(message) => {
            eprintln!("{}", Paint::red(message));
            process::exit(1);
        }
        state => {
            bail!(format!("Analysis ended in an unexpected state: {}", state.status()));
        }
    }

    return Ok(());
}

async fn run_chat(config: &Config) -> Result<()> {
    let store = ConversationStore::new(backend_from_config(config));
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    return chat::start(&store, input, &mut io::stdout()).await;
}

async fn print_history_list(config: &Config) -> Result<()> {
    let mut browser = HistoryBrowser::new(backend_from_config(config));
    browser.load().await;

    println!("{}", render_record_list(browser.records()));
    return Ok(());
}

fn print_open_analysis(open: &OpenAnalysis, raw: bool) {
    if raw {
        println!("{}", open.parsed.to_markdown());
    } else {
        println!("{}", render_open_analysis(open));
    }
}

async fn open_history_record(config: &Config, matches: &ArgMatches) -> Result<()> {
    let raw = matches.get_flag("raw");
    let mut browser = HistoryBrowser::new(backend_from_config(config));
    browser.load().await;

    if let Some(id) = matches.get_one::<i64>("id").copied() {
        if browser.select_by_id(id).is_none() {
            bail!(format!("No saved analysis with ID {id}"));
        }
    } else {
        if browser.records().is_empty() {
            println!("{EMPTY_HISTORY_TEXT}");
            return Ok(());
        }

        let options = browser
            .records()
            .iter()
            .map(|record| return render_record_line(record))
            .collect::<Vec<String>>();

        let idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Which analysis would you like to open?")
            .default(0)
            .items(&options)
            .interact_opt()?;

        match idx {
            Some(idx) => {
                let record = browser.records()[idx].clone();
                browser.select(&record);
            }
            None => return Ok(()),
        }
    }

    if let Some(open) = browser.selected() {
        print_open_analysis(open, raw);
    }

    return Ok(());
}

fn arg_raw() -> Arg {
    return Arg::new("raw")
        .long("raw")
        .help("Print the analysis as markdown with a single json block instead of rendering it.")
        .action(ArgAction::SetTrue);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for SymptoCheck")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running SymptoCheck with environment variable RUST_LOG=symptocheck")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_diagnose() -> Command {
    return Command::new("diagnose")
        .about("Describe your symptoms and get an AI analysis with a confidence breakdown.")
        .arg(
            Arg::new("symptoms")
                .help("Free-text description of your symptoms.")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(arg_raw());
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a conversation with the medical assistant.");
}

fn subcommand_history() -> Command {
    return Command::new("history")
        .about("Browse past analyses.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List past analyses, newest first."))
        .subcommand(
            Command::new("open")
                .about("Open a past analysis by ID. Omit passing any ID to load an interactive selection.")
                .arg(
                    clap::Arg::new("id")
                        .short('i')
                        .long("id")
                        .help("Analysis ID")
                        .value_parser(value_parser!(i64))
                        .required(false),
                )
                .arg(arg_raw()),
        );
}

pub fn build() -> Command {
    let commands_text = chat::help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("symptocheck")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(true)
        .subcommand(subcommand_diagnose())
        .subcommand(subcommand_chat())
        .subcommand(subcommand_history())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ApiBase.to_string())
                .long(ConfigKey::ApiBase.to_string())
                .env("SYMPTOCHECK_API_BASE")
                .num_args(1)
                .help(format!(
                    "Base address of the diagnosis service API. [default: {}]",
                    Config::default_value(ConfigKey::ApiBase)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SYMPTOCHECK_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default_value(ConfigKey::ConfigFile)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => match debug_matches.subcommand() {
            Some(("log-path", _)) => {
                let log_path = debug_log_dir().join("debug.log");
                println!("{}", log_path.to_string_lossy());
            }
            Some(("enum-config", _)) => {
                println!("{}", ConfigKey::VARIANTS.join("\n"));
            }
            _ => {
                subcommand_debug().print_long_help()?;
            }
        },
        Some(("diagnose", subcmd_matches)) => {
            let config = Config::load(vec![&matches, subcmd_matches]).await?;
            run_diagnose(&config, subcmd_matches).await?;
        }
        Some(("chat", subcmd_matches)) => {
            let config = Config::load(vec![&matches, subcmd_matches]).await?;
            run_chat(&config).await?;
        }
        Some(("history", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("list", list_matches)) => {
                let config = Config::load(vec![&matches, subcmd_matches, list_matches]).await?;
                print_history_list(&config).await?;
            }
            Some(("open", open_matches)) => {
                let config = Config::load(vec![&matches, subcmd_matches, open_matches]).await?;
                open_history_record(&config, open_matches).await?;
            }
            _ => {
                subcommand_history().print_long_help()?;
            }
        },
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::default_value(ConfigKey::ConfigFile));
            }
            _ => {
                subcommand_config().print_long_help()?;
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
        }
        _ => {
            build().print_long_help()?;
        }
    }

    return Ok(());
}
