//! `shelfscan` - scan product barcodes from the terminal and get the verdict

mod input;
mod session;
mod terminal;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use shelfscan_client::{decode_analysis, HttpAnalysisClient};
use shelfscan_core::{
    FileProfileProvider, ProductAnalysis, ProfileProvider, ScanConfig, StaticProfileProvider,
};
use shelfscan_present::{DetailsScreen, GardenScreen};
use shelfscan_scanner::{compose_narration, Collaborators, ScanOrchestrator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use session::Session;
use terminal::{
    Console, ConsoleNavigator, ConsoleSpeech, FlagPermission, StderrNotifier, TerminalCamera,
};

fn cli() -> Command {
    let analysis_file = Arg::new("file")
        .long("file")
        .short('f')
        .required(true)
        .value_name("ANALYSIS_JSON")
        .value_parser(value_parser!(PathBuf))
        .help("Saved analysis response");

    Command::new("shelfscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scan product barcodes and get a traffic-light verdict")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan barcodes from arguments or stdin")
                .arg(
                    Arg::new("barcodes")
                        .value_name("BARCODE")
                        .num_args(0..)
                        .help("[type:]data, read from stdin when omitted"),
                )
                .arg(
                    Arg::new("api-url")
                        .long("api-url")
                        .value_name("URL")
                        .help("Analysis service base URL"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("profile")
                        .long("profile")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("User profile (JSON or TOML), demo profile otherwise"),
                )
                .arg(
                    Arg::new("deny-camera")
                        .long("deny-camera")
                        .action(ArgAction::SetTrue)
                        .help("Answer the camera permission prompt with 'deny'"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Also print each result as JSON"),
                ),
        )
        .subcommand(
            Command::new("details")
                .about("Render the details screen for a saved analysis")
                .arg(analysis_file.clone()),
        )
        .subcommand(
            Command::new("narrate")
                .about("Print what the scanner would say for a saved analysis")
                .arg(analysis_file),
        )
        .subcommand(Command::new("garden").about("Render the impact garden"))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// File, then environment, then flags
fn load_config(args: &ArgMatches) -> Result<ScanConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ScanConfig::from_toml_file(path)?,
        None => ScanConfig::new(),
    };
    config = config.with_env_overrides()?;
    if let Some(url) = args.get_one::<String>("api-url") {
        config = config.with_api_base_url(url.as_str());
    }
    if let Some(path) = args.get_one::<PathBuf>("profile") {
        config = config.with_profile_path(path.clone());
    }
    config.validate()?;
    Ok(config)
}

fn profile_provider(config: &ScanConfig) -> Result<Arc<dyn ProfileProvider>> {
    let provider: Arc<dyn ProfileProvider> = match &config.profile_path {
        Some(path) => Arc::new(FileProfileProvider::load(path)?),
        None => Arc::new(StaticProfileProvider::demo()),
    };
    Ok(provider)
}

fn load_analysis(path: &Path) -> Result<ProductAnalysis> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    decode_analysis(&bytes)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("parsing {}", path.display()))
}

async fn run_scan(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let client = HttpAnalysisClient::new(&config)?;
    tracing::info!("Analysis endpoint: {}", client.endpoint());

    let console = Arc::new(Console::stdout());
    let navigator = Arc::new(ConsoleNavigator::new(console.clone()));
    let unlock_delay = config.unlock_delay();
    let orchestrator = Arc::new(ScanOrchestrator::new(
        config.clone(),
        Collaborators {
            client: Arc::new(client),
            profiles: profile_provider(&config)?,
            permissions: Arc::new(FlagPermission::new(!args.get_flag("deny-camera"))),
            speech: Arc::new(ConsoleSpeech::new(console.clone())),
            navigator: navigator.clone(),
            notifier: Arc::new(StderrNotifier),
            camera: Arc::new(TerminalCamera::default()),
        },
    ));

    let session = Session::new(
        orchestrator,
        console,
        navigator,
        unlock_delay,
        args.get_flag("json"),
    );
    if !session.start().await {
        return Ok(());
    }

    let barcodes: Vec<String> = args
        .get_many::<String>("barcodes")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if barcodes.is_empty() {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session.run_lines(stdin).await?;
    } else {
        session.run_barcodes(&barcodes).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("scan", args)) => run_scan(args).await,
        Some(("details", args)) => {
            let analysis = load_analysis(required_path(args)?)?;
            println!("{}", DetailsScreen::new(&analysis));
            Ok(())
        }
        Some(("narrate", args)) => {
            let analysis = load_analysis(required_path(args)?)?;
            println!("{}", compose_narration(&analysis));
            Ok(())
        }
        Some(("garden", _)) => {
            println!("{}", GardenScreen::default());
            Ok(())
        }
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}

fn required_path(args: &ArgMatches) -> Result<&PathBuf> {
    args.get_one::<PathBuf>("file").context("missing --file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://10.0.0.2:9000\"\nunlock_delay_ms = 500").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let matches = cli().get_matches_from([
            "shelfscan",
            "scan",
            "--config",
            &path,
            "--api-url",
            "http://localhost:1234",
        ]);
        let (_, args) = matches.subcommand().unwrap();
        let config = load_config(args).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:1234");
        assert_eq!(config.unlock_delay_ms, 500);
    }

    #[test]
    fn scan_arguments_are_collected() {
        let matches = cli().get_matches_from(["shelfscan", "scan", "--json", "qr:a", "123"]);
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "scan");
        assert!(args.get_flag("json"));
        let barcodes: Vec<&String> = args.get_many::<String>("barcodes").unwrap().collect();
        assert_eq!(barcodes, ["qr:a", "123"]);
    }

    #[test]
    fn saved_analysis_is_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"product_id\": \"1\", \"overall_score\": \"high\"}}").unwrap();
        assert!(load_analysis(file.path()).is_err());

        let mut good = tempfile::NamedTempFile::new().unwrap();
        write!(
            good,
            "{{\"product_id\":\"1\",\"product_name\":null,\"overall_score\":80,\"overall_status\":\"GREEN\",\"agent_verdicts\":[]}}"
        )
        .unwrap();
        let analysis = load_analysis(good.path()).unwrap();
        assert_eq!(analysis.display_name(), "Unknown product");
    }
}
