use anyhow::Context;
use clap::{Parser, Subcommand};

use troika_admin::api::{HttpOrderApi, OrderApi};
use troika_admin::authz::routes::{guard, visible_sections};
use troika_admin::authz::Actor;
use troika_admin::config::ApiConfig;
use troika_admin::jwt::{optional_session, required_session, Session};
use troika_admin::orders::{available_actions, OrderStatusService, Refusal, StatusAction, TransitionOutcome};

#[derive(Parser, Debug)]
#[command(author, version, about = "Troika staff console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in with staff credentials and print the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the actor behind TROIKA_TOKEN
    Whoami,
    /// Run the route guard for a dashboard path
    Access { path: String },
    /// List the sidebar sections visible to the current actor
    Nav,
    /// Inspect or move an order through its statuses
    Order {
        #[command(subcommand)]
        command: OrderCommand,
    },
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    /// Show an order and the actions available for it
    Show { order_id: i64 },
    /// Move to the next status
    Next { order_id: i64 },
    /// Complete an order that is out for delivery
    Finish { order_id: i64 },
    /// Move back one status
    Back { order_id: i64 },
    /// Cancel the order
    Cancel { order_id: i64 },
    /// Restore a cancelled order to Новый
    Restore { order_id: i64 },
}

impl OrderCommand {
    fn order_id(&self) -> i64 {
        match self {
            OrderCommand::Show { order_id }
            | OrderCommand::Next { order_id }
            | OrderCommand::Finish { order_id }
            | OrderCommand::Back { order_id }
            | OrderCommand::Cancel { order_id }
            | OrderCommand::Restore { order_id } => *order_id,
        }
    }

    fn action(&self) -> Option<StatusAction> {
        match self {
            OrderCommand::Show { .. } => None,
            OrderCommand::Next { .. } => Some(StatusAction::Next),
            OrderCommand::Finish { .. } => Some(StatusAction::Finish),
            OrderCommand::Back { .. } => Some(StatusAction::Back),
            OrderCommand::Cancel { .. } => Some(StatusAction::Cancel),
            OrderCommand::Restore { .. } => Some(StatusAction::Restore),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env();
    init_tracing();

    let cli = Cli::parse();
    let config = ApiConfig::from_env()?;
    let token = config.token.as_deref();

    match cli.command {
        Commands::Login { email, password } => {
            // A stale TROIKA_TOKEN must not block getting a fresh one.
            let api = HttpOrderApi::new(&ApiConfig::new(config.base_url.clone()));
            let token = api.login(&email, &password).await?;
            println!("{token}");
        }
        Commands::Whoami => {
            let session = required_session(token).context("TROIKA_TOKEN is not a valid session token")?;
            print_actor(session.actor());
        }
        Commands::Access { path } => {
            let session = optional_session(token);
            println!("{}", guard(session.as_ref().map(Session::actor), &path).as_str());
        }
        Commands::Nav => {
            let session = optional_session(token);
            for section in visible_sections(session.as_ref().map(Session::actor)) {
                println!("{:<24} {}", section.title, section.path);
                for item in section.items {
                    println!("  {:<22} {}", item.title, item.path);
                }
            }
        }
        Commands::Order { command } => {
            let session = required_session(token).context("TROIKA_TOKEN is not a valid session token")?;
            let api = HttpOrderApi::new(&config);
            run_order_command(api, Some(session.actor()), command).await?;
        }
    }

    Ok(())
}

async fn run_order_command(api: HttpOrderApi, actor: Option<&Actor>, command: OrderCommand) -> anyhow::Result<()> {
    let service = OrderStatusService::new(api);
    let mut order = service.api().get_order(command.order_id()).await?;

    let Some(action) = command.action() else {
        println!("{:<10} {}", "Order", order.public_order_id);
        println!("{:<10} {}", "Status", order.status);
        println!("{:<10} {}", "Total", order.total_amount);
        println!("{:<10} {}", "Delivery", order.delivery_method);
        println!("{:<10} {}", "Payment", order.payment_method);
        let labels: Vec<_> = available_actions(actor, order.status)
            .iter()
            .map(|a| format!("{} ({})", a.label(), a.as_str()))
            .collect();
        println!("{:<10} {}", "Actions", labels.join(", "));
        return Ok(());
    };

    match service.apply(actor, &mut order, action).await? {
        TransitionOutcome::Applied { from, to } => {
            println!("{}: {from} -> {to}", order.public_order_id);
        }
        TransitionOutcome::Refused(Refusal::Unauthorized) => {
            anyhow::bail!("current actor may not change order status");
        }
        TransitionOutcome::Refused(Refusal::Unavailable { action, status }) => {
            anyhow::bail!("action '{action}' is not available for status {status}");
        }
    }

    Ok(())
}

fn print_actor(actor: &Actor) {
    println!("{:<10} {}", "User", actor.user_id);
    match actor.office_id {
        Some(office) => println!("{:<10} {}", "Office", office),
        None => println!("{:<10} -", "Office"),
    }
    println!(
        "{:<10} admin={} moderator={} staff={}",
        "Role", actor.role.admin, actor.role.moderator, actor.role.staff
    );
}

fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
