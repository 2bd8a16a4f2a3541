use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{CommandFactory as _, Parser, Subcommand};
use clap_complete::Shell;

use modbook::config::{DEFAULT_CONFIG_PATH, ModbookConfig, OutputFormat};
use modbook_core::{
    Address, Description, EditDescriptor, Email, Name, Phone, RoleEditOperation, Tag,
};
use modbook::{AddressBook, EditCommand, Index, NameFilter, telemetry};

/// Address book for module contacts
///
/// Keeps each person's phone, email, address, tags, description, and the
/// modules they take, tutor, or teach.
///
/// QUICK START:
///
///   modbook list
///   modbook list --find alex
///   modbook edit 1 -p 91234567 -e alex@example.com
///   modbook edit 2 -m "+CS1101S MA1521-TA"
///   modbook edit 2 -m "-CS1101S"
///
/// Indexes are the 1-based positions printed by `list` with the same
/// `--find` keywords.
#[derive(Parser)]
#[command(name = "modbook")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'modbook <command> --help' for more information on a specific command.")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "MODBOOK_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List persons, optionally only those whose name contains a keyword
    List {
        /// Show only persons whose name contains one of these words
        #[arg(long = "find", num_args = 1..)]
        find: Vec<String>,

        /// Output format (defaults to the config's `output.format`)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Edit the person at INDEX in the displayed list
    ///
    /// Only the given fields change. Tags given with -t replace all
    /// existing tags; --clear-tags removes them. A module role operation
    /// starts with + (add) or - (delete), followed by MODULECODE[-ROLE]
    /// entries, e.g. "+CS1101S MA1521-TA" or "-CS1101S-Tutor".
    Edit {
        /// 1-based position in the displayed list
        index: usize,

        /// Resolve INDEX against the list filtered by these name keywords
        #[arg(long = "find", num_args = 1..)]
        find: Vec<String>,

        #[arg(short = 'n', long)]
        name: Option<Name>,

        #[arg(short = 'p', long)]
        phone: Option<Phone>,

        #[arg(short = 'e', long)]
        email: Option<Email>,

        #[arg(short = 'a', long)]
        address: Option<Address>,

        /// Replace all tags (repeatable)
        #[arg(short = 't', long = "tag", conflicts_with = "clear_tags")]
        tags: Vec<Tag>,

        /// Remove every tag
        #[arg(long)]
        clear_tags: bool,

        /// Module role operation, e.g. "+CS1101S-TA" or "-MA1521"
        #[arg(short = 'm', long = "module", allow_hyphen_values = true)]
        module: Option<RoleEditOperation>,

        #[arg(short = 'd', long)]
        description: Option<Description>,

        /// Output format (defaults to the config's `output.format`)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let _telemetry = telemetry::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { find, format } => {
            let config = load_config(&cli.config)?;
            let mut book = load_book(&config)?;
            if !find.is_empty() {
                book.set_filter(NameFilter::new(&find));
            }
            let displayed = book.filtered();
            let format = format.unwrap_or(config.output.format);
            println!("{}", format.render_list(&displayed, book.persons().len())?);
            Ok(())
        }
        Commands::Edit {
            index,
            find,
            name,
            phone,
            email,
            address,
            tags,
            clear_tags,
            module,
            description,
            format,
        } => {
            let config = load_config(&cli.config)?;
            let mut builder = EditDescriptor::builder();
            if let Some(v) = name {
                builder = builder.name(v);
            }
            if let Some(v) = phone {
                builder = builder.phone(v);
            }
            if let Some(v) = email {
                builder = builder.email(v);
            }
            if let Some(v) = address {
                builder = builder.address(v);
            }
            if clear_tags {
                builder = builder.clear_tags();
            } else if !tags.is_empty() {
                builder = builder.tags(tags);
            }
            if let Some(v) = module {
                builder = builder.role_edit(v);
            }
            if let Some(v) = description {
                builder = builder.description(v);
            }
            let command = EditCommand::new(Index::from_one_based(index), builder.build())?;

            let mut book = load_book(&config)?;
            if !find.is_empty() {
                book.set_filter(NameFilter::new(&find));
            }
            let result = command.execute(&mut book)?;
            book.save(&config.book.path)
                .with_context(|| format!("saving {}", config.book.path.display()))?;

            let format = format.unwrap_or(config.output.format);
            println!("{}", format.render_edit(&result)?);
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "modbook", &mut io::stdout());
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<ModbookConfig> {
    ModbookConfig::load(path).context("loading modbook config")
}

fn load_book(config: &ModbookConfig) -> Result<AddressBook> {
    AddressBook::load(&config.book.path)
        .with_context(|| format!("loading address book {}", config.book.path.display()))
}
