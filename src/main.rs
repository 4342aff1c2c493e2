use clap::{Args, Parser, Subcommand};
use contract_pay::application::flow::{FlowConfig, PaymentRequestFlow};
use contract_pay::domain::ports::{CredentialSourceBox, PaymentGateway};
use contract_pay::error::PaymentError;
use contract_pay::infrastructure::credentials::{CookieCredentials, StaticCredentials};
use contract_pay::infrastructure::http::{DEFAULT_API_URL, HttpPaymentGateway};
use contract_pay::interfaces::text::{render, render_balance};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the marketplace API
    #[arg(long, env = "CONTRACT_PAY_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Bearer token for the API
    #[arg(long, env = "CONTRACT_PAY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Cookie header to read the `access_token` cookie from, used when no token is given
    #[arg(long, env = "CONTRACT_PAY_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Request a payment against a contract's remaining balance
    Request(RequestArgs),
    /// Show the balance of a contract
    Balance {
        #[arg(long)]
        contract_id: u64,
    },
}

#[derive(Args)]
struct RequestArgs {
    #[arg(long)]
    contract_id: u64,

    /// Amount to request
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// What the payment is for
    #[arg(long, default_value = "")]
    description: String,

    /// Remaining contract balance. Fetched from the API when omitted.
    #[arg(long)]
    balance: Option<Decimal>,

    /// Validate and show the commission breakdown without submitting
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing() {
    let filter = std::env::var("CONTRACT_PAY_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".into());
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn credentials(cli: &Cli) -> CredentialSourceBox {
    match (&cli.token, &cli.cookie) {
        (Some(token), _) => Box::new(StaticCredentials::new(Some(token.clone()))),
        (None, Some(cookie)) => Box::new(CookieCredentials::new(cookie.clone())),
        (None, None) => Box::new(StaticCredentials::anonymous()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let gateway = HttpPaymentGateway::from_base_url(&cli.api_url).into_diagnostic()?;
    let credentials = credentials(&cli);

    match cli.command {
        Command::Balance { contract_id } => {
            let token = credentials
                .access_token()
                .ok_or(PaymentError::Unauthenticated)
                .into_diagnostic()?;
            let balance = gateway
                .contract_balance(contract_id, &token)
                .await
                .into_diagnostic()?;
            print!("{}", render_balance(&balance));
        }
        Command::Request(args) => request(args, gateway, credentials).await?,
    }

    Ok(())
}

async fn request(
    args: RequestArgs,
    gateway: HttpPaymentGateway,
    credentials: CredentialSourceBox,
) -> Result<()> {
    let contract_balance = match args.balance {
        Some(balance) => balance,
        None => {
            let token = credentials
                .access_token()
                .ok_or(PaymentError::Unauthenticated)
                .into_diagnostic()?;
            gateway
                .contract_balance(args.contract_id, &token)
                .await
                .into_diagnostic()?
                .contract_balance
        }
    };

    let mut flow = PaymentRequestFlow::new(
        FlowConfig {
            contract_id: args.contract_id,
            contract_balance,
        },
        Box::new(gateway),
        credentials,
        || println!("Payment requested."),
    );

    print!("{}", render(&flow));
    flow.open().into_diagnostic()?;
    flow.set_amount(args.amount);
    flow.set_description(args.description);

    if args.dry_run {
        let checked = flow.validate();
        print!("{}", render(&flow));
        checked.into_diagnostic()?;
        return Ok(());
    }

    let outcome = flow.submit().await;
    if outcome.is_err() {
        print!("{}", render(&flow));
    }
    outcome.into_diagnostic()
}
