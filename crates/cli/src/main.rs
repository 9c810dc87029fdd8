use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bookstore_cli::api::HttpBooksApi;
use bookstore_cli::views::{CatalogueView, DraftField, HomeView, SignupForm};
use bookstore_cli::DEFAULT_API_URL;

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Terminal client for the bookstore catalogue")]
struct Cli {
    /// Base URL of the bookstore API
    #[arg(long, env = "BOOKSTORE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the home page, optionally signing up (kept in this session only)
    Home(SignupArgs),
    /// List every book in the catalogue
    List,
    /// Add a book, then show the refreshed catalogue
    Add(AddArgs),
    /// Delete a book by id, then show the refreshed catalogue
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct SignupArgs {
    #[arg(long, requires_all = ["email", "password", "confirm_password"])]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Price as typed, e.g. 9.99
    #[arg(long)]
    price: String,
    #[arg(long)]
    quantity: String,
    #[arg(long)]
    image_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    tracing::debug!(api_url = %cli.api_url, "bookstore client starting");

    match cli.command {
        Command::Home(args) => home(args),
        Command::List => {
            let mut view = CatalogueView::new(HttpBooksApi::new(cli.api_url));
            view.mount().await;
            finish(&view)
        }
        Command::Add(args) => {
            let mut view = CatalogueView::new(HttpBooksApi::new(cli.api_url));
            view.mount().await;
            view.open_add_form();
            view.set_field(DraftField::Title, args.title);
            view.set_field(DraftField::Description, args.description);
            view.set_field(DraftField::Price, args.price);
            view.set_field(DraftField::Quantity, args.quantity);
            view.set_field(DraftField::ImageUrl, args.image_url);
            view.submit().await;
            finish(&view)
        }
        Command::Delete { id, yes } => {
            let mut view = CatalogueView::new(HttpBooksApi::new(cli.api_url));
            view.mount().await;
            let issued = view.delete(&id, |prompt| yes || confirm(prompt)).await;
            if !issued {
                println!("Cancelled.");
                return ExitCode::SUCCESS;
            }
            finish(&view)
        }
    }
}

fn home(args: SignupArgs) -> ExitCode {
    let mut view = HomeView::new();

    if let Some(name) = args.name {
        view.open_signup();
        *view.form_mut() = SignupForm {
            full_name: name,
            email: args.email.unwrap_or_default(),
            password: args.password.unwrap_or_default(),
            confirm_password: args.confirm_password.unwrap_or_default(),
        };

        if let Err(e) = view.submit() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    print!("{}", view.render());
    ExitCode::SUCCESS
}

fn finish<A: bookstore_cli::api::BooksApi>(view: &CatalogueView<A>) -> ExitCode {
    print!("{}", view.render());
    if view.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Ask a yes/no question on the terminal; anything but "y"/"yes" declines.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
