use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use heat_resource_fetcher::config::{Config, ConnectionOverrides, EndpointType};
use heat_resource_fetcher::error::missing_stack_name;
use heat_resource_fetcher::openstack::client::ServiceClients;
use heat_resource_fetcher::openstack::http::format_api_error;
use heat_resource_fetcher::output::{self, OutputFormat};
use heat_resource_fetcher::resource::{self, DescribePolicy};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Export the resources of an OpenStack Heat stack
#[derive(Parser, Debug)]
#[command(name = "heat-resource-fetcher", version, about, long_about = None)]
struct Args {
    /// Name of the stack to export
    stack_name: String,

    /// Identity service endpoint (Keystone v2.0)
    #[arg(long, env = "OS_AUTH_URL")]
    os_auth_url: Option<String>,

    #[arg(long, env = "OS_USERNAME")]
    os_username: Option<String>,

    #[arg(long, env = "OS_PASSWORD", hide_env_values = true)]
    os_password: Option<String>,

    #[arg(long, env = "OS_TENANT_NAME")]
    os_tenant_name: Option<String>,

    /// Only use catalog endpoints of this region
    #[arg(long, env = "OS_REGION_NAME")]
    os_region_name: Option<String>,

    /// Catalog endpoint type to use
    #[arg(long, value_enum, env = "OS_ENDPOINT_TYPE")]
    os_endpoint_type: Option<EndpointType>,

    /// Leave out router gateways and router interfaces
    #[arg(long)]
    ignore_heat_resources: bool,

    /// Include resource types without a dedicated lookup, as Heat describes them
    #[arg(long)]
    include_unsupported_resources: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Remember the connection settings (except the password) for later runs
    #[arg(long)]
    save_config: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

impl Args {
    fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            auth_url: self.os_auth_url.clone(),
            username: self.os_username.clone(),
            password: self.os_password.clone(),
            tenant_name: self.os_tenant_name.clone(),
            endpoint_type: self.os_endpoint_type,
            region_name: self.os_region_name.clone(),
        }
    }

    fn policy(&self) -> DescribePolicy {
        DescribePolicy {
            ignore_heat_resources: self.ignore_heat_resources,
            include_unsupported_resources: self.include_unsupported_resources,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("heat-resource-fetcher started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("heat-resource-fetcher")
            .join("heat-resource-fetcher.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".heat-resource-fetcher")
            .join("heat-resource-fetcher.log");
    }
    PathBuf::from("heat-resource-fetcher.log")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    match run(&args).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            if let Some(name) = missing_stack_name(&err) {
                tracing::error!("Stack '{}' not found", name);
                eprintln!("'{}': no such stack", name);
                return Ok(ExitCode::FAILURE);
            }
            tracing::error!("{:#}", err);
            if let Some(hint) = format_api_error(&err) {
                eprintln!("{}", hint);
            }
            Err(err)
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let mut config = Config::load();
    let settings = config.resolve(args.overrides())?;
    tracing::debug!("Connection settings: {:?}", settings);

    if args.save_config {
        config.remember(&settings);
        config.save()?;
        tracing::info!("Saved connection settings to {:?}", Config::config_path());
    }

    let clients = ServiceClients::new(settings)?;

    let stack = resource::get_stack_by_name(&clients, &args.stack_name).await?;
    tracing::info!("Exporting stack '{}'", stack.name()?);

    let resources = resource::get_all_stack_resource_info(&clients, stack.id()?, args.policy()).await?;

    let rendered = output::render(&resources, args.format)?;
    output::write(&rendered, args.output.as_deref())
}
