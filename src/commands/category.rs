use crate::{
    db::store::Store,
    libs::{category::CategoryTree, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a category
    Add {
        name: String,
        /// Parent category ID
        #[arg(short, long)]
        parent: Option<i64>,
    },
    /// Show the category tree
    List,
    /// Rename a category
    Rename { id: i64, name: String },
    /// Move a category under another one, or to the top level without --parent
    Move {
        id: i64,
        #[arg(short, long)]
        parent: Option<i64>,
    },
    /// Delete a category; its tasks become uncategorized
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: CategoryArgs) -> Result<()> {
    let tree = CategoryTree::new(Store::open_default()?);

    match args.command {
        CategoryCommand::Add { name, parent } => {
            let category = tree.add(&name, parent).await?;
            msg_success!(Message::CategoryCreated(category.name, category.id.unwrap_or_default()));
        }
        CategoryCommand::List => {
            let categories = tree.all().await?;
            msg_print!(Message::CategoriesHeader, true);
            View::categories(&categories)?;
            if categories.is_empty() {
                msg_info!(Message::NoCategories);
            }
        }
        CategoryCommand::Rename { id, name } => {
            let category = tree.rename(id, &name).await?;
            msg_success!(Message::CategoryRenamed(category.name));
        }
        CategoryCommand::Move { id, parent } => {
            let category = tree.reparent(id, parent).await?;
            msg_success!(Message::CategoryMoved(category.name));
        }
        CategoryCommand::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteCategory(id).to_string())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
            tree.delete(id).await?;
            msg_success!(Message::CategoryDeleted(id));
        }
    }

    Ok(())
}
