mod api_client;
mod form_prompt;
mod render;
mod supervisor;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cookbook_core::schema::{self, RECIPE};
use cookbook_core::{Recipe, RecipeForm};
use dialoguer::Confirm;
use serde_json::Value;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::api_client::{ApiClient, ClientError};
use crate::supervisor::RenderSupervisor;

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(about = "Create, browse and edit recipes", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(
        long,
        global = true,
        env = "COOKBOOK_SERVER",
        default_value = "http://localhost:3000"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, newest first
    List {
        /// Only recipes in this category (e.g. dessert)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one recipe
    Show { id: String },
    /// Write a new recipe interactively
    Add,
    /// Create a recipe from a JSON form file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Apply the fields in a JSON file to an existing recipe
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a recipe
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(&cli.server)?;

    match cli.command {
        Commands::List { category } => {
            let recipes = client.list_recipes(category.as_deref()).await?;
            print!("{}", render::recipe_summaries(&recipes));
        }
        Commands::Show { id } => {
            let recipe = client.get_recipe(&id).await?;
            show(&recipe)?;
        }
        Commands::Add => {
            let contract = author(RecipeForm::new())?;
            let created = client.create_recipe(&contract).await?;
            println!("Created recipe {}", created.id);
            show(&created)?;
        }
        Commands::Create { file } => {
            let form: RecipeForm = read_json(&file)?;
            let contract = form.submit().map_err(|errors| {
                form_prompt::print_errors(&errors);
                anyhow::anyhow!("Recipe not saved")
            })?;
            let created = client.create_recipe(&contract).await?;
            println!("Created recipe {}", created.id);
        }
        Commands::Update { id, file } => {
            let changes: Value = read_json(&file)?;
            if let Err(errors) = schema::validate_partial(&RECIPE, &changes) {
                form_prompt::print_errors(&errors);
                bail!("Recipe not saved");
            }
            let updated = client.update_recipe(&id, &changes).await?;
            println!("Updated recipe {}", updated.id);
        }
        Commands::Delete { id, yes } => {
            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Delete recipe {}?", id))
                    .default(false)
                    .interact()?
            {
                println!("Nothing deleted");
                return Ok(());
            }
            let deleted = client.delete_recipe(&id).await?;
            println!("Deleted \"{}\"", deleted.title);
        }
    }

    Ok(())
}

/// Prompts until the form passes validation or the user gives up.
fn author(mut form: RecipeForm) -> Result<cookbook_core::CreateRecipeContract> {
    loop {
        form = form_prompt::prompt_form(form)?;
        match form.submit() {
            Ok(contract) => return Ok(contract),
            Err(errors) => {
                form_prompt::print_errors(&errors);
                let retry = Confirm::new()
                    .with_prompt("Edit the recipe and try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    bail!("Recipe not saved");
                }
            }
        }
    }
}

/// Renders under a supervisor; on a terminal a failed render can be retried.
fn show(recipe: &Recipe) -> Result<()> {
    let mut supervisor = RenderSupervisor::new();
    println!("{}", supervisor.render(|| render::recipe_detail(recipe)));

    while supervisor.is_faulted() && std::io::stdin().is_terminal() {
        let retry = Confirm::new()
            .with_prompt("Try displaying the recipe again?")
            .default(true)
            .interact()?;
        if !retry {
            break;
        }
        supervisor.reset();
        println!("{}", supervisor.render(|| render::recipe_detail(recipe)));
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn report(error: &anyhow::Error) {
    eprintln!("Error: {}", error);
    match error.downcast_ref::<ClientError>() {
        Some(ClientError::Api {
            details: Some(details),
            ..
        }) if details.len() > 1 => {
            for detail in details {
                eprintln!("  - {}", detail);
            }
        }
        Some(_) => {}
        None => {
            for cause in error.chain().skip(1) {
                eprintln!("  caused by: {}", cause);
            }
        }
    }
}
