//! Holocard CLI
//!
//! Usage:
//!   holocard [OPTIONS] <COMMAND>
//!
//! Commands:
//!   inspect   Summarize the configuration tree
//!   resolve   Resolve a template and print the effective scene state
//!   export    Capture a resolved template into a standalone HTML snapshot
//!   cards     List saved cards, newest first
//!   delete    Delete a saved card by id
//!   ingest    Store a base64 data-URI asset, deduplicating by content

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};

use holocard::config::CardConfig;
use holocard::editor::EditorSession;
use holocard::export::render_card;
use holocard::external::{LogNotifier, NoticeKind, Notifier};
use holocard::gallery;
use holocard::resolve_card;
use holocard::store::{ingest_asset, CardStore, FsCardStore};
use holocard::Baseline;

#[derive(Parser)]
#[command(name = "holocard")]
#[command(about = "Card visual configuration and resolution tool")]
struct Cli {
    /// Configuration tree (JSON)
    #[arg(short, long, default_value = "cardConfig.json")]
    config: PathBuf,

    /// Saved-card store (JSON)
    #[arg(long, default_value = "cards.json")]
    cards: PathBuf,

    /// Asset upload directory
    #[arg(long, default_value = "assets/uploads")]
    assets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the configuration tree
    Inspect,

    /// Resolve a template (and grade) and print the effective scene state
    Resolve {
        /// Template index
        #[arg(short, long, default_value_t = 0)]
        template: usize,

        /// Grade id; defaults to the template's first declared grade
        #[arg(short, long)]
        grade: Option<String>,
    },

    /// Capture a resolved template and write a standalone HTML snapshot
    Export {
        /// Template index
        #[arg(short, long, default_value_t = 0)]
        template: usize,

        /// Grade id; defaults to the template's first declared grade
        #[arg(short, long)]
        grade: Option<String>,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// List saved cards, newest first
    Cards,

    /// Delete a saved card by id
    Delete { id: String },

    /// Store a base64 data-URI asset read from a file
    Ingest { file: PathBuf },
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn load_config(path: &Path) -> CardConfig {
    match CardConfig::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading config '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let notifier = LogNotifier;

    match cli.command {
        Command::Inspect => {
            let config = load_config(&cli.config);
            println!("templates: {}", config.templates.len());
            for (index, template) in config.templates.iter().enumerate() {
                let grades: Vec<&str> = template.grades.iter().map(|g| g.id.as_str()).collect();
                println!(
                    "  [{index}] {} ({}) styles={} assets={} layout={} grades=[{}]",
                    template.name,
                    template.id,
                    template.styles.len(),
                    template.assets.len(),
                    template.layout.len(),
                    grades.join(", ")
                );
            }
        }

        Command::Resolve { template, grade } => {
            let config = load_config(&cli.config);
            let (scene, applied) = match resolve_card(&config, template, grade.as_deref()) {
                Ok(resolved) => resolved,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };

            match applied {
                Some(id) => println!("applied grade: {id}"),
                None => println!("applied grade: (none)"),
            }
            println!("custom properties:");
            for (name, value) in scene.vars.iter() {
                println!("  {name}: {value}");
            }
            println!("fields:");
            for (key, el) in &scene.fields {
                let style = &el.style;
                println!(
                    "  {key}: class={} align={} left={} right={} top={} bottom={}",
                    el.class_name,
                    style.text_align.as_deref().unwrap_or("-"),
                    style.left.as_deref().unwrap_or("-"),
                    style.right.as_deref().unwrap_or("-"),
                    style.top.as_deref().unwrap_or("-"),
                    style.bottom.as_deref().unwrap_or("-"),
                );
            }
        }

        Command::Export {
            template,
            grade,
            out,
        } => {
            let config = load_config(&cli.config);
            let (scene, applied) = match resolve_card(&config, template, grade.as_deref()) {
                Ok(resolved) => resolved,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };

            let mut session = EditorSession::new();
            session.template_index = template;
            session.sync_applied_grade(applied);

            let baseline = Baseline::default();
            let card =
                gallery::build_saved_card(&scene, &baseline, &config, &session, None, now_ms());
            let html = render_card(&card);

            if let Err(e) = fs::write(&out, html) {
                eprintln!("Error writing '{}': {}", out.display(), e);
                process::exit(1);
            }
            println!("exported {}", out.display());
        }

        Command::Cards => {
            let store = FsCardStore::new(&cli.cards, &cli.assets);
            match store.get_cards() {
                Ok(cards) => {
                    println!("cards: {}", cards.len());
                    for card in cards {
                        println!(
                            "  {} {} (template {}, updated {})",
                            card.id, card.name, card.template_id, card.updated_at
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error listing cards: {e}");
                    process::exit(1);
                }
            }
        }

        Command::Delete { id } => {
            let mut store = FsCardStore::new(&cli.cards, &cli.assets);
            match store.delete_card(&id) {
                Ok(()) => notifier.notify(NoticeKind::Success, &format!("Card deleted: {id}")),
                Err(e) => {
                    notifier.notify(NoticeKind::Error, &format!("Delete failed: {e}"));
                    process::exit(1);
                }
            }
        }

        Command::Ingest { file } => {
            let data_uri = match fs::read_to_string(&file) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", file.display(), e);
                    process::exit(1);
                }
            };
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "asset.png".to_string());

            match ingest_asset(&cli.assets, &filename, data_uri.trim()) {
                Ok(stored) => {
                    if stored.deduplicated {
                        println!("{} (deduplicated)", stored.url);
                    } else {
                        println!("{}", stored.url);
                    }
                }
                Err(e) => {
                    notifier.notify(NoticeKind::Error, &format!("Upload failed: {e}"));
                    process::exit(1);
                }
            }
        }
    }
}
