use azure_guardrails::azure::AzCli;
use azure_guardrails::config;
use azure_guardrails::models::SqlServerRef;
use azure_guardrails::processing::AppServiceRef;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::path::Path;

#[derive(Debug, Parser)]
#[command(name = "azure-guardrails", version, about = "Azure resource group locks and SQL firewall upkeep")]
struct Cli {
    /// Show what would change without writing to Azure
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a CanNotDelete lock to every resource group in every subscription
    LockAudit,
    /// Allow an App Service's outbound IPs through an Azure SQL Server firewall
    SqlFirewall {
        /// SQL server name
        #[arg(long)]
        sql_server: String,
        /// Resource group of the SQL server
        #[arg(long)]
        sql_resource_group: String,
        /// App Service name
        #[arg(long)]
        app_name: String,
        /// Resource group of the App Service
        #[arg(long)]
        app_resource_group: String,
        /// Delete conflicting rules instead of renaming them to DEP<timestamp>-<name>
        #[arg(long)]
        remove_conflicts: bool,
        /// Subscription ID, defaults to the az cli default subscription
        #[arg(long)]
        subscription: Option<String>,
    },
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    if Path::new(config::LOG_CONFIG_FILE).exists() {
        log4rs::init_file(config::LOG_CONFIG_FILE, Default::default())?;
    } else {
        let stdout = ConsoleAppender::builder().build();
        let log_config = Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
        log4rs::init_config(log_config)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    init_logging()?;
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let provider = AzCli::new();
    let result = match cli.command {
        Commands::LockAudit => azure_guardrails::lock_audit(&provider, cli.dry_run).map(|_| ()),
        Commands::SqlFirewall {
            sql_server,
            sql_resource_group,
            app_name,
            app_resource_group,
            remove_conflicts,
            subscription,
        } => {
            let server = SqlServerRef {
                subscription: subscription.clone(),
                resource_group: sql_resource_group,
                name: sql_server,
            };
            let app = AppServiceRef {
                subscription,
                resource_group: app_resource_group,
                name: app_name,
            };
            azure_guardrails::sql_firewall(&provider, &server, &app, remove_conflicts, cli.dry_run)
                .map(|_| ())
        }
    };

    if let Err(e) = &result {
        log::error!("Run aborted: {e}");
    }
    result
}
