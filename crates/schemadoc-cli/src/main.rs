//! `schemadoc` — command-line browser for the schema registry's documentation.
//!
//! # Usage
//!
//! ```text
//! schemadoc table public_v1 business
//! schemadoc browse --category Ads
//! schemadoc search source business
//! schemadoc --editor me@example.com note column public_v1 business name "Display name"
//! schemadoc category public_v1 business Uncategorized
//! ```

mod render;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use schemadoc_client::ApiClient;
use schemadoc_view::{
  browse::{BrowseView, CategoryFilter},
  search::{self, SearchKind},
  table::TableViewAggregator,
};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "schemadoc", version, about = "Browse and annotate schema documentation")]
struct Cli {
  /// Path to a TOML config file (base_url, editor, timeout_secs, namespace).
  #[arg(short, long, value_name = "FILE", default_value = "schemadoc.toml")]
  config: PathBuf,

  /// Base URL of the schema registry.
  #[arg(long, env = "SCHEMADOC_URL")]
  url: Option<String>,

  /// Identity recorded on saved notes.
  #[arg(long, env = "SCHEMADOC_EDITOR")]
  editor: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show one table: columns, types, notes.
  Table {
    namespace: Option<String>,
    table:     Option<String>,
    /// Look the table up by source id instead of by name.
    #[arg(long, conflicts_with_all = ["namespace", "table"])]
    id:        Option<i64>,
  },
  /// List the tables of a namespace.
  Browse {
    #[arg(long)]
    namespace:     Option<String>,
    #[arg(long, conflicts_with = "uncategorized")]
    category:      Option<String>,
    /// Only tables without a category.
    #[arg(long)]
    uncategorized: bool,
  },
  /// Search schemas, topics, sources or namespaces.
  Search {
    /// One of: schema, topic, source, namespace.
    kind: SearchKind,
    text: String,
  },
  /// List the topics of a source.
  Topics { source_id: i64 },
  /// List the sources of a namespace.
  Sources { namespace: String },
  /// Write a table or column note.
  #[command(subcommand)]
  Note(NoteCommand),
  /// Set a table's category; "" or "Uncategorized" clears it.
  Category {
    namespace: String,
    table:     String,
    value:     String,
  },
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
  Table {
    namespace: String,
    table:     String,
    text:      String,
  },
  Column {
    namespace: String,
    table:     String,
    column:    String,
    text:      String,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("reading config {}", cli.config.display()))?;
  // CLI flags override the config file and environment.
  if let Some(url) = cli.url {
    settings.base_url = url;
  }
  if let Some(editor) = cli.editor {
    settings.editor = editor;
  }

  let client = Arc::new(ApiClient::new(settings.api_config()).context("building API client")?);
  run(cli.command, client, &settings).await
}

async fn run(command: Command, client: Arc<ApiClient>, settings: &Settings) -> Result<()> {
  match command {
    Command::Table { namespace, table, id } => {
      let mut agg = TableViewAggregator::new(client, settings.view_config());
      let loaded = match (id, namespace, table) {
        (Some(id), _, _) => agg.load_by_id(id).await,
        (None, Some(namespace), Some(table)) => agg.load(&namespace, &table).await,
        _ => bail!("give either --id or both a namespace and a table"),
      };
      loaded.context("loading table")?;
      print!("{}", render::table(agg.view()));
    }

    Command::Browse { namespace, category, uncategorized } => {
      let namespace = namespace.unwrap_or_else(|| settings.namespace.clone());
      let mut view = BrowseView::new(client, namespace);
      view.filter = match (category, uncategorized) {
        (_, true) => CategoryFilter::Uncategorized,
        (Some(c), false) => CategoryFilter::Named(c),
        (None, false) => CategoryFilter::All,
      };
      view.load().await.context("listing tables")?;
      print!("{}", render::sources(view.filtered()));
      if !view.categories.is_empty() {
        eprintln!("categories: {}", view.categories.join(", "));
      }
    }

    Command::Search { kind, text } => {
      let results = search::search(client.as_ref(), kind, &text).await?;
      print!("{}", render::search(&results));
    }

    Command::Topics { source_id } => {
      let results = search::topics_for_source(client.as_ref(), source_id).await?;
      print!("{}", render::search(&results));
    }

    Command::Sources { namespace } => {
      let results = search::sources_for_namespace(client.as_ref(), &namespace).await?;
      print!("{}", render::search(&results));
    }

    Command::Note(note) => {
      if settings.editor.is_empty() {
        bail!("saving notes needs an editor identity (--editor or SCHEMADOC_EDITOR)");
      }
      let mut agg = TableViewAggregator::new(client, settings.view_config());
      match note {
        NoteCommand::Table { namespace, table, text } => {
          agg.load(&namespace, &table).await.context("loading table")?;
          let slot = agg.table_note_mut().context("table has no schema")?;
          slot.begin_edit();
          slot.set_draft(text);
          agg.save_table_note().await.context("saving table note")?;
        }
        NoteCommand::Column { namespace, table, column, text } => {
          agg.load(&namespace, &table).await.context("loading table")?;
          let slot = agg
            .column_note_mut(&column)
            .with_context(|| format!("no column {column:?} in {namespace}.{table}"))?;
          slot.begin_edit();
          slot.set_draft(text);
          agg.save_column_note(&column).await.context("saving column note")?;
        }
      }
      print!("{}", render::table(agg.view()));
    }

    Command::Category { namespace, table, value } => {
      let mut agg = TableViewAggregator::new(client, settings.view_config());
      agg.load(&namespace, &table).await.context("loading table")?;
      agg.set_category(&value).await.context("saving category")?;
      if let Some(category) = agg.view().category() {
        println!("{namespace}.{table}: {category}");
      }
    }
  }
  Ok(())
}
