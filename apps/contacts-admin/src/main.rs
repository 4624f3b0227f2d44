use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use contacts_service::dashboard::{ContactsClient, ContactsPage, DeleteOutcome, Field};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Manage contacts through the contacts REST server
#[derive(Debug, Parser)]
#[command(name = "contacts-admin", version, about)]
struct Cli {
    /// Root URL of the contacts server
    #[arg(long, env = "CONTACTS_API_URL", default_value = "http://127.0.0.1:8087")]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the contacts table (default)
    List,
    /// Create a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change fields of an existing contact
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a contact
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn confirm_on_stdin(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

fn fill(page: &mut ContactsPage<ContactsClient>, fields: [(Field, Option<String>); 3]) {
    for (field, value) in fields {
        if let Some(value) = value {
            page.set_field(field, value);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = ContactsClient::new(&cli.api_url)?;
    let mut page = ContactsPage::new(client);
    page.mount().await;
    if let Some(banner) = page.load_error() {
        bail!("{banner}");
    }

    match cli.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Add { name, email, phone } => {
            page.open_add();
            fill(
                &mut page,
                [
                    (Field::Name, Some(name)),
                    (Field::Email, email),
                    (Field::Phone, phone),
                ],
            );
            submit(&mut page).await?;
        }
        Command::Edit {
            id,
            name,
            email,
            phone,
        } => {
            if !page.open_edit(&id) {
                bail!("no contact with id '{id}'");
            }
            fill(
                &mut page,
                [
                    (Field::Name, name),
                    (Field::Email, email),
                    (Field::Phone, phone),
                ],
            );
            submit(&mut page).await?;
        }
        Command::Delete { id, yes } => {
            let outcome = page
                .delete(&id, |question| yes || confirm_on_stdin(question))
                .await;
            match outcome {
                DeleteOutcome::Unknown => bail!("no contact with id '{id}'"),
                DeleteOutcome::Cancelled => {
                    println!("Cancelled.");
                    return Ok(());
                }
                DeleteOutcome::Deleted => {}
                DeleteOutcome::RolledBack => {
                    let alert = page.alert().unwrap_or("delete failed").to_string();
                    bail!("{alert}");
                }
            }
        }
    }

    print!("{}", page.render());
    Ok(())
}

async fn submit(page: &mut ContactsPage<ContactsClient>) -> Result<()> {
    if let Some(saved) = page.submit().await {
        tracing::info!(id = %saved.id, "contact saved");
        return Ok(());
    }
    let message = page
        .editor()
        .and_then(|editor| editor.error.clone())
        .context("contact was not saved")?;
    bail!("{message}")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run(Cli::parse()).await
}
