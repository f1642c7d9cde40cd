//! Disclosure Form CLI
//!
//! Command-line front end over a local storage directory: register a user,
//! edit sections and record lists, print totals, import and export.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use disclosure_form::io::{
    columns_for, export_json, import_json, list_from_csv, list_to_csv, render_summary,
};
use disclosure_form::session::{Argon2Hasher, UserDirectory};
use disclosure_form::validation::missing_required;
use disclosure_form::{AppConfig, FormEngine, JsonFileStore, SectionName};

#[derive(Parser, Debug)]
#[command(name = "disclosure_form", version, about = "Financial disclosure form engine")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long)]
    user: String,

    #[arg(long)]
    password: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new user and create an empty form
    Register {
        #[command(flatten)]
        creds: Credentials,
    },
    /// Print subtotals and totals
    Summary {
        #[command(flatten)]
        creds: Credentials,
        /// Emit the totals as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Append a blank record to a list
    Add {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
        list: String,
    },
    /// Remove the record at an index
    Remove {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
        list: String,
        index: usize,
    },
    /// Set a scalar field of a section
    Set {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
        field: String,
        value: String,
    },
    /// Set a field of one record
    SetRecord {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
        list: String,
        index: usize,
        field: String,
        value: String,
    },
    /// Reset a section to empty
    Clear {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
    },
    /// List blank required fields
    Validate {
        #[command(flatten)]
        creds: Credentials,
    },
    /// Write the whole form as JSON
    ExportJson {
        #[command(flatten)]
        creds: Credentials,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the whole form from a JSON file
    ImportJson {
        #[command(flatten)]
        creds: Credentials,
        file: PathBuf,
    },
    /// Write one record list as CSV
    ExportCsv {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
        list: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace one record list from a CSV file
    ImportCsv {
        #[command(flatten)]
        creds: Credentials,
        section: SectionName,
        list: String,
        file: PathBuf,
    },
    /// Print the section template registry as JSON
    Templates,
}

fn open_engine(config: &AppConfig, creds: &Credentials) -> Result<FormEngine<JsonFileStore>> {
    let users = UserDirectory::load(config.users_path())
        .with_context(|| format!("reading {}", config.users_path().display()))?;
    let session = users.login(&Argon2Hasher, &creds.user, &creds.password, config.session_timeout_minutes)?;
    let store = JsonFileStore::new(config.forms_dir());
    let engine = FormEngine::open(session, store, config.engine.clone())
        .with_context(|| format!("loading form for {}", creds.user))?;
    Ok(engine)
}

/// Persist anything autosave did not
fn finish(mut engine: FormEngine<JsonFileStore>) -> Result<()> {
    if engine.is_dirty() {
        engine.flush().context("saving form")?;
    }
    Ok(())
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("Written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(cli.config.as_deref()).context("reading config")?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_storage_dir(dir);
    }

    match cli.command {
        Command::Register { creds } => {
            let path = config.users_path();
            let mut users = UserDirectory::load(&path)?;
            users.register(&Argon2Hasher, &creds.user, &creds.password)?;
            users.save(&path).with_context(|| format!("writing {}", path.display()))?;

            let engine = open_engine(&config, &creds)?;
            println!("Registered {}", engine.session().user_key());
            finish(engine)?;
        }

        Command::Summary { creds, json } => {
            let engine = open_engine(&config, &creds)?;
            let summary = engine.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_summary(engine.state(), &summary));
            }
        }

        Command::Add { creds, section, list } => {
            let mut engine = open_engine(&config, &creds)?;
            let records = engine.append_from_registry(section, &list)?;
            println!("{}.{} now has {} records (new index {})", section, list, records.len(), records.len() - 1);
            finish(engine)?;
        }

        Command::Remove { creds, section, list, index } => {
            let mut engine = open_engine(&config, &creds)?;
            let before = engine.list(section, &list).map(|l| l.len()).unwrap_or(0);
            let records = engine.remove(section, &list, index)?;
            if records.len() == before {
                println!("No record at {}.{}[{}] ({} records)", section, list, index, before);
            } else {
                println!("Removed {}.{}[{}], {} records left", section, list, index, records.len());
            }
            finish(engine)?;
        }

        Command::Set { creds, section, field, value } => {
            let mut engine = open_engine(&config, &creds)?;
            if engine.section(section).list(&field).is_some() {
                bail!("{}.{} is a record list; use set-record", section, field);
            }
            engine.set_field(section, &field, value)?;
            finish(engine)?;
        }

        Command::SetRecord { creds, section, list, index, field, value } => {
            let mut engine = open_engine(&config, &creds)?;
            engine.update_field(section, &list, index, &field, value)?;
            if let Some(record) = engine.record(section, &list, index) {
                println!("{}.{}[{}] = {}", section, list, index, serde_json::to_string(record)?);
            }
            finish(engine)?;
        }

        Command::Clear { creds, section } => {
            let mut engine = open_engine(&config, &creds)?;
            engine.clear_section(section)?;
            println!("Cleared {}", section);
            finish(engine)?;
        }

        Command::Validate { creds } => {
            let engine = open_engine(&config, &creds)?;
            let missing = missing_required(engine.state());
            if missing.is_empty() {
                println!("All required fields are filled in");
            } else {
                println!("{} required fields are blank:", missing.len());
                for field in &missing {
                    println!("  {}", field);
                }
            }
        }

        Command::ExportJson { creds, output } => {
            let engine = open_engine(&config, &creds)?;
            let json = export_json(&engine.snapshot())?;
            write_output(output.as_deref(), &format!("{}\n", json))?;
        }

        Command::ImportJson { creds, file } => {
            let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let form = import_json(&text)?;
            let mut engine = open_engine(&config, &creds)?;
            engine.replace_state(form)?;
            println!("Imported {}", file.display());
            finish(engine)?;
        }

        Command::ExportCsv { creds, section, list, output } => {
            let engine = open_engine(&config, &creds)?;
            let records = engine.list(section, &list).cloned().unwrap_or_default();
            let columns = columns_for(section, &list, &records);
            let csv = list_to_csv(&records, &columns)?;
            write_output(output.as_deref(), &csv)?;
        }

        Command::ImportCsv { creds, section, list, file } => {
            let reader = File::open(&file).with_context(|| format!("opening {}", file.display()))?;
            let records = list_from_csv(reader)?;
            let mut engine = open_engine(&config, &creds)?;
            let records = engine.set_list(section, &list, records)?;
            println!("Imported {} records into {}.{}", records.len(), section, list);
            finish(engine)?;
        }

        Command::Templates => {
            let specs: Vec<_> = disclosure_form::templates::registry().collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
    }

    Ok(())
}
