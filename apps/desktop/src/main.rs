use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{CatalogController, HttpCatalogApi, DEFAULT_BASE_URL};
use shared::domain::{Item, ItemDraft, ItemId};

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Manage the food catalog from the command line")]
struct Cli {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every item in server order.
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change the given fields of an item; the rest keep their current values.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Default)]
struct DraftChanges {
    name: Option<String>,
    price: Option<String>,
    image: Option<String>,
    description: Option<String>,
}

impl DraftChanges {
    fn apply(self, mut draft: ItemDraft) -> ItemDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        draft
    }
}

fn format_item(item: &Item) -> String {
    let availability = if item.available {
        "available"
    } else {
        "unavailable"
    };
    format!(
        "{:>4}  {:<24} {:>8}  {availability}",
        item.id.0, item.name, item.price
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let api = HttpCatalogApi::new(&cli.server_url)?;
    let mut controller = CatalogController::new(Arc::new(api));
    controller
        .load()
        .await
        .with_context(|| format!("failed to load items from {}", cli.server_url))?;

    match cli.command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(controller.items())?);
            } else {
                for item in controller.items() {
                    println!("{}", format_item(item));
                }
            }
        }
        Command::Add {
            name,
            price,
            image,
            description,
        } => {
            let draft = ItemDraft {
                name,
                image,
                price,
                description,
            };
            draft.validate()?;
            let created = controller.create(draft).await?;
            println!("created {}", format_item(&created));
        }
        Command::Edit {
            id,
            name,
            price,
            image,
            description,
        } => {
            let item = controller
                .state()
                .item(ItemId(id))
                .cloned()
                .ok_or_else(|| anyhow!("no item with id {id}"))?;
            let draft = DraftChanges {
                name,
                price,
                image,
                description,
            }
            .apply(item.draft());
            draft.validate()?;

            controller.begin_edit(item);
            let updated = controller.update(draft).await?;
            controller.close_edit_modal();
            println!("updated {}", format_item(&updated));
        }
        Command::Delete { id } => {
            controller.delete(ItemId(id)).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ham() -> Item {
        Item {
            id: ItemId(1),
            name: "Ham".to_string(),
            image: "u".to_string(),
            price: "10.00".to_string(),
            description: "d".to_string(),
            available: true,
        }
    }

    #[test]
    fn changes_only_override_given_fields() {
        let draft = DraftChanges {
            price: Some("12.00".to_string()),
            ..DraftChanges::default()
        }
        .apply(ham().draft());

        assert_eq!(draft.price, "12.00");
        assert_eq!(draft.name, "Ham");
        assert_eq!(draft.image, "u");
    }

    #[test]
    fn formats_rows_with_availability() {
        let mut item = ham();
        assert!(format_item(&item).ends_with("available"));
        item.available = false;
        assert!(format_item(&item).ends_with("unavailable"));
        assert!(format_item(&item).trim_start().starts_with("1  Ham"));
    }

    #[test]
    fn parses_edit_arguments() {
        let cli = Cli::try_parse_from(["catalog", "edit", "3", "--price", "4.50"]).expect("parse");
        assert_eq!(cli.server_url, DEFAULT_BASE_URL);
        match cli.command {
            Command::Edit { id, price, name, .. } => {
                assert_eq!(id, 3);
                assert_eq!(price.as_deref(), Some("4.50"));
                assert!(name.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
