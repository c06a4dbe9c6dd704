//! Payments CLI
//!
//! Command-line interface for the payment processor API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use payments_client::PaymentsClient;
use payments_types::{CreatePaymentRequest, LineItemRequest, PaymentId};

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payment processor CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payment processor API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create a payment at the configured gateway
    Create {
        /// ISO-4217 currency code
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Total amount in minor units
        #[arg(long)]
        amount: i64,
        /// Where the buyer lands after approving
        #[arg(long)]
        redirect_url: String,
        /// Where the buyer lands after cancelling
        #[arg(long)]
        cancel_url: String,
        /// Line item as NAME:AMOUNT:QUANTITY (repeatable)
        #[arg(long = "item", required = true, value_parser = parse_line_item)]
        items: Vec<LineItemRequest>,
    },
    /// Get payment details
    Get {
        /// Payment ID (UUID)
        id: String,
    },
    /// Capture an approved payment
    Capture {
        /// Payment ID (UUID)
        id: String,
    },
    /// Refund part or all of a payment
    Refund {
        /// Payment ID (UUID)
        id: String,
        /// Amount to refund in minor units
        #[arg(long)]
        amount: i64,
    },
}

/// Parses `NAME:AMOUNT:QUANTITY`. The name may itself contain colons.
fn parse_line_item(s: &str) -> Result<LineItemRequest, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(quantity), Some(amount), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected NAME:AMOUNT:QUANTITY, got {}", s));
    };

    Ok(LineItemRequest {
        name: name.to_string(),
        amount: amount
            .parse()
            .map_err(|_| format!("invalid item amount: {}", amount))?,
        quantity: quantity
            .parse()
            .map_err(|_| format!("invalid item quantity: {}", quantity))?,
    })
}

fn parse_payment_id(s: &str) -> Result<PaymentId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid payment ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                currency,
                amount,
                redirect_url,
                cancel_url,
                items,
            } => {
                let req = CreatePaymentRequest {
                    currency,
                    amount,
                    redirect_url,
                    cancel_url,
                    line_items: items,
                };
                let detail = client.create_payment(&req).await?;
                println!("{}", serde_json::to_string_pretty(&detail)?);
            }
            PaymentCommands::Get { id } => {
                let payment = client.get_payment(parse_payment_id(&id)?).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Capture { id } => {
                client.capture_payment(parse_payment_id(&id)?).await?;
                println!("✓ Payment captured");
            }
            PaymentCommands::Refund { id, amount } => {
                let refund = client
                    .refund_payment(parse_payment_id(&id)?, amount)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&refund)?);
            }
        },
    }

    Ok(())
}
