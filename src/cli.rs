use crate::interactive::{drive, Exit};
use crate::render;
use clap::{Args, Parser, Subcommand};
use course_navigator::config::AppConfig;
use course_navigator::error::AppError;
use course_navigator::gateway::HttpCourseGateway;
use course_navigator::telemetry;
use course_navigator::workflows::selection::SelectionSession;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Course Navigator",
    about = "Find and search the courses you are eligible to take",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through program, term and minor to list or search eligible courses (default command)
    Wizard(WizardArgs),
    /// Print the programs, academic terms and minors the wizard offers
    Catalog,
}

#[derive(Args, Debug, Default)]
struct WizardArgs {
    /// Override the configured course backend URL
    #[arg(long)]
    api_url: Option<String>,
    /// Override the configured request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Wizard(WizardArgs::default()));

    match command {
        Command::Wizard(args) => run_wizard(args).await,
        Command::Catalog => {
            let mut stdout = std::io::stdout();
            stdout.write_all(render::catalog().as_bytes())?;
            Ok(())
        }
    }
}

async fn run_wizard(mut args: WizardArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(url) = args.api_url.take() {
        config.api.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(secs) = args.timeout_secs.take().filter(|secs| *secs > 0) {
        config.api.timeout_secs = secs;
    }

    telemetry::init(&config.telemetry)?;

    let gateway = HttpCourseGateway::new(&config.api)?;
    info!(api = gateway.base_url(), "starting course selection wizard");

    let mut session = SelectionSession::new(Arc::new(gateway), config.api.timeout());
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();

    match drive(&mut session, input, &mut output).await? {
        Exit::Quit => info!("wizard closed by user"),
        Exit::EndOfInput => info!("wizard input closed"),
    }
    Ok(())
}
