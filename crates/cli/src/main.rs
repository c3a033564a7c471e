use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gantry_appdata::{list_managed_files, AppDataPaths, DATA_DIR_NAME};
use gantry_config::{default_config_path, ConfigError, ConfigStore, Value};
use gantry_host::GANTRY_VERSION;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Inspect and maintain the Gantry scripting layer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Use this config file instead of the per-user default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the framework environment: version, config path, data root
    Env,
    /// Read and edit the user configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Inspect and clean the shared data directory
    #[command(subcommand)]
    Appdata(AppdataCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// List configuration sections
    List,
    /// Print one option
    Get(ConfigGetArgs),
    /// Set one option; the value is parsed as TOML, falling back to a string
    Set(ConfigSetArgs),
    /// Remove an option, or a whole section
    Remove(ConfigRemoveArgs),
}

#[derive(Args)]
struct ConfigGetArgs {
    /// Section name
    section: String,
    /// Option name
    option: String,
}

#[derive(Args)]
struct ConfigSetArgs {
    /// Section name; created if it does not exist
    section: String,
    /// Option name
    option: String,
    /// New value, e.g. `3`, `true`, `"text"`, `["a", "b"]`
    value: String,
}

#[derive(Args)]
struct ConfigRemoveArgs {
    /// Section name
    section: String,
    /// Option to remove; omitting it removes the whole section
    option: Option<String>,
}

#[derive(Subcommand)]
enum AppdataCommand {
    /// List Gantry-owned files in the data directory
    List(AppdataListArgs),
    /// Remove instance data files left behind by other sessions
    Cleanup(AppdataCleanupArgs),
}

#[derive(Args)]
struct AppdataListArgs {
    /// Use this directory instead of the per-user data root
    #[arg(long, value_name = "PATH")]
    data_root: Option<PathBuf>,
}

#[derive(Args)]
struct AppdataCleanupArgs {
    /// Host version whose data directory to clean
    #[arg(long, value_name = "VERSION")]
    host_version: String,

    /// Session whose instance files to keep; defaults to this process id
    #[arg(long, value_name = "ID")]
    session_id: Option<u32>,

    /// Use this directory instead of the per-user data root
    #[arg(long, value_name = "PATH")]
    data_root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Env => run_env(cli.json, cli.config),
        Commands::Config(command) => match command {
            ConfigCommand::List => run_config_list(cli.json, cli.config),
            ConfigCommand::Get(args) => run_config_get(args, cli.json, cli.config),
            ConfigCommand::Set(args) => run_config_set(args, cli.config),
            ConfigCommand::Remove(args) => run_config_remove(args, cli.config),
        },
        Commands::Appdata(command) => match command {
            AppdataCommand::List(args) => run_appdata_list(args, cli.json),
            AppdataCommand::Cleanup(args) => run_appdata_cleanup(args, cli.json),
        },
    }
}

fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(default_config_path()?),
    }
}

fn open_store(override_path: Option<PathBuf>) -> Result<ConfigStore> {
    let path = resolve_config_path(override_path)?;
    Ok(ConfigStore::load(path)?)
}

fn default_data_root() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|base| base.join(DATA_DIR_NAME))
        .context("no user data directory available on this platform")
}

fn run_env(json: bool, config_override: Option<PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(config_override)?;
    let data_root = default_data_root()?;

    if json {
        let payload = serde_json::json!({
            "version": GANTRY_VERSION.to_string(),
            "config_path": config_path,
            "config_exists": config_path.exists(),
            "data_root": data_root,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("gantry {}", *GANTRY_VERSION);
        let note = if config_path.exists() { "" } else { " (not created yet)" };
        println!("config: {}{note}", config_path.display());
        println!("data root: {}", data_root.display());
    }
    Ok(())
}

fn run_config_list(json: bool, config_override: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_override)?;
    let names: Vec<&str> = store.section_names().collect();

    if json {
        let payload = serde_json::json!({ "sections": names });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if names.is_empty() {
        println!("no sections");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn run_config_get(args: ConfigGetArgs, json: bool, config_override: Option<PathBuf>) -> Result<()> {
    let store = open_store(config_override)?;
    let value = store
        .get_section(&args.section)?
        .get_option(&args.option)?
        .clone();

    if json {
        let payload = serde_json::json!({
            "section": args.section,
            "option": args.option,
            "value": serde_json::to_value(&value)?,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

fn run_config_set(args: ConfigSetArgs, config_override: Option<PathBuf>) -> Result<()> {
    let mut store = open_store(config_override)?;
    let value = parse_option_value(&args.value);

    match store.get_section_mut(&args.section) {
        Ok(section) => section.set_option(&args.option, value),
        Err(ConfigError::SectionMissing(_)) => {
            store.add_section(&args.section)?.set_option(&args.option, value);
        }
        Err(err) => return Err(err.into()),
    }

    store.save_changes()?;
    log::info!("set {}.{}", args.section, args.option);
    Ok(())
}

fn run_config_remove(args: ConfigRemoveArgs, config_override: Option<PathBuf>) -> Result<()> {
    let mut store = open_store(config_override)?;

    match &args.option {
        Some(option) => {
            let removed = store.get_section_mut(&args.section)?.remove_option(option);
            if removed.is_none() {
                bail!("option not found: {}.{option}", args.section);
            }
            log::info!("removed {}.{option}", args.section);
        }
        None => {
            store.remove_section(&args.section)?;
            log::info!("removed section {}", args.section);
        }
    }

    store.save_changes()?;
    Ok(())
}

fn open_appdata(host_version: &str, data_root: Option<PathBuf>) -> Result<AppDataPaths> {
    let paths = match data_root {
        Some(root) => AppDataPaths::new(root, host_version)?,
        None => AppDataPaths::discover(host_version)?,
    };
    Ok(paths)
}

fn run_appdata_list(args: AppdataListArgs, json: bool) -> Result<()> {
    let root = match args.data_root {
        Some(root) => root,
        None => default_data_root()?,
    };
    // Listing never creates the directory; an absent root just has no files.
    let files = if root.is_dir() {
        list_managed_files(&root)?
    } else {
        Vec::new()
    };

    if json {
        let payload = serde_json::json!({ "files": files });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if files.is_empty() {
        println!("no data files");
    } else {
        for file in files {
            println!("{}", file.display());
        }
    }
    Ok(())
}

fn run_appdata_cleanup(args: AppdataCleanupArgs, json: bool) -> Result<()> {
    let session_id = args.session_id.unwrap_or_else(std::process::id);
    let paths = open_appdata(&args.host_version, args.data_root)?.with_session_id(session_id);
    let report = paths.cleanup_instance_files()?;

    if json {
        let payload = serde_json::json!({
            "removed": report.removed,
            "kept": report.kept,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "removed {} instance file(s), kept {}",
            report.removed.len(),
            report.kept
        );
    }
    Ok(())
}

/// Parse a CLI-supplied value as TOML so `config set exporterconfig passes 3`
/// stores an integer. Anything that is not valid TOML becomes a plain string,
/// which is what `config set exporterconfig format dwg` looks like it does.
fn parse_option_value(raw: &str) -> Value {
    let wrapped = format!("value = {raw}");
    match wrapped.parse::<toml::Table>() {
        Ok(mut table) if table.len() == 1 => table
            .remove("value")
            .unwrap_or_else(|| Value::String(raw.to_string())),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_values_parse_as_toml_first() {
        assert_eq!(parse_option_value("3"), Value::Integer(3));
        assert_eq!(parse_option_value("true"), Value::Boolean(true));
        assert_eq!(parse_option_value("\"quoted\""), Value::String("quoted".into()));
        assert_eq!(
            parse_option_value("[\"a\", \"b\"]"),
            Value::Array(vec![Value::String("a".into()), Value::String("b".into())])
        );
    }

    #[test]
    fn unparseable_values_fall_back_to_strings() {
        assert_eq!(parse_option_value("dwg"), Value::String("dwg".into()));
        assert_eq!(parse_option_value("3 trailing"), Value::String("3 trailing".into()));
    }

    #[test]
    fn injected_extra_keys_do_not_parse() {
        let raw = "1\nsneaky = 2";
        assert_eq!(parse_option_value(raw), Value::String(raw.into()));
    }
}
