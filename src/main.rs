use control_chart::config::{ChartConfig, ChartRequest, ParetoRequest};
use control_chart::error::{ChartError, Result};
use control_chart::layout::{build_pareto_plan, build_plan};
use control_chart::timed;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: control-chart [--pareto] [REQUEST.json | -] [--config CONFIG.json] [--pretty]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    /// `None` reads the request from stdin
    request: Option<PathBuf>,
    config: Option<PathBuf>,
    pretty: bool,
    pareto: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--pretty" => parsed.pretty = true,
            "--pareto" => parsed.pareto = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| ChartError::InvalidConfig(format!("--config needs a path\n{USAGE}")))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "-" => parsed.request = None,
            other if other.starts_with("--") => {
                return Err(ChartError::InvalidConfig(format!(
                    "unknown option '{other}'\n{USAGE}"
                )));
            }
            path => parsed.request = Some(PathBuf::from(path)),
        }
    }
    Ok(parsed)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut json = String::new();
            std::io::stdin().read_to_string(&mut json)?;
            Ok(json)
        }
    }
}

fn load_config(args: &Args) -> Result<Option<ChartConfig>> {
    args.config.as_deref().map(ChartConfig::load).transpose()
}

fn render_json<T: serde::Serialize>(plan: &T, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(plan)?)
    } else {
        Ok(serde_json::to_string(plan)?)
    }
}

fn run(args: Args) -> Result<String> {
    let json = read_input(args.request.as_deref())?;
    let config = load_config(&args)?;

    let output = if args.pareto {
        let mut request = ParetoRequest::from_json(&json)?;
        if let Some(config) = config {
            request.config = config;
        }
        let plan = timed!("build_pareto_plan", build_pareto_plan(&request))?;
        render_json(&plan, args.pretty)
    } else {
        let mut request = ChartRequest::from_json(&json)?;
        if let Some(config) = config {
            request.config = config;
        }
        let plan = timed!("build_plan", build_plan(&request))?;
        render_json(&plan, args.pretty)
    };
    profiling::finish_frame!();
    output
}

/// Diagnostics go to stderr so stdout stays valid JSON; `RUST_LOG` overrides
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        puffin_http::Server::new(&format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT)).ok()
    };

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", err.title(), err.user_message());
            ExitCode::FAILURE
        }
    }
}
