use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use superalias_settings::{
    FileSettingsStore, InMemorySettingsStore, SettingsManager, SettingsStore, SettingsTab,
};
use superalias_vault::{SuperAlias, Vault};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings.as_deref();
    match cli.command {
        Command::Sync(args) => cmd_sync(args, settings, &cli.format),
        Command::Lookup(args) => cmd_lookup(args, settings, &cli.format),
        Command::Config(args) => cmd_config(args, settings, &cli.format),
    }
}

fn settings_store(vault: &Path, settings: Option<&Path>) -> Arc<dyn SettingsStore> {
    match settings {
        Some(path) => Arc::new(FileSettingsStore::new(path)),
        None => Arc::new(FileSettingsStore::for_vault(vault)),
    }
}

fn open_plugin(vault: &Vault, settings: Option<&Path>, keys: Option<String>) -> anyhow::Result<SuperAlias> {
    let store: Arc<dyn SettingsStore> = match keys {
        Some(keys) => Arc::new(InMemorySettingsStore::with_data(json!({ "keys": keys }))),
        None => settings_store(vault.root(), settings),
    };
    let manager = SettingsManager::load(store).context("loading settings")?;
    Ok(SuperAlias::new(manager, vault.cache()))
}

fn cmd_sync(args: SyncArgs, settings: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let vault = Vault::open(&args.vault)
        .with_context(|| format!("opening vault {}", args.vault.display()))?;
    let plugin = open_plugin(&vault, settings, args.keys)?;
    let outcomes = vault.resolve_all(&plugin)?;

    let mut written = Vec::new();
    if args.write {
        for (path, outcome) in &outcomes {
            if outcome.changed() && vault.persist(path)? {
                written.push(path.to_string());
            }
        }
    }
    let updated = outcomes.iter().filter(|(_, o)| o.changed()).count();

    match format {
        OutputFormat::Json => {
            let notes: Vec<_> = outcomes
                .iter()
                .map(|(path, outcome)| {
                    json!({
                        "path": path.as_str(),
                        "aliases": outcome.after,
                        "added": outcome.added(),
                    })
                })
                .collect();
            let report = json!({ "notes": notes, "updated": updated, "written": written });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for (path, outcome) in &outcomes {
                let added = outcome.added();
                let aliases: Vec<String> = outcome
                    .after
                    .iter()
                    .map(|alias| {
                        if added.contains(&alias.as_str()) {
                            format!("+{alias}").green().to_string()
                        } else {
                            alias.clone()
                        }
                    })
                    .collect();
                println!("{}  {}", path.to_string().bold(), aliases.join(", "));
            }
            println!(
                "{} Synced {} notes ({} updated, {} written)",
                "✓".green().bold(),
                outcomes.len(),
                updated,
                written.len()
            );
            if updated > 0 && !args.write {
                println!("  Run with {} to save aliases to disk.", "--write".yellow());
            }
        }
    }
    Ok(())
}

fn cmd_lookup(args: LookupArgs, settings: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let vault = Vault::open(&args.vault)
        .with_context(|| format!("opening vault {}", args.vault.display()))?;
    let plugin = open_plugin(&vault, settings, None)?;
    vault.resolve_all(&plugin)?;
    let matches = vault.lookup(&args.name)?;

    match format {
        OutputFormat::Json => {
            let paths: Vec<&str> = matches.iter().map(|p| p.as_str()).collect();
            println!("{}", json!({ "name": args.name, "matches": paths }));
        }
        OutputFormat::Text if matches.is_empty() => {
            println!("No notes match {}.", format!("[[{}]]", args.name).yellow());
        }
        OutputFormat::Text => {
            for path in &matches {
                println!("{}", path.to_string().bold());
            }
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, settings: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let store = settings_store(&args.vault, settings);
    let mut manager = SettingsManager::load(store).context("loading settings")?;
    let mut tab = SettingsTab::new(&mut manager);

    if let Some(value) = &args.value {
        tab.on_change("keys", value).context("saving settings")?;
    }

    for field in tab.display() {
        match format {
            OutputFormat::Json => {
                println!("{}", json!({ "name": field.name, "value": field.value }))
            }
            OutputFormat::Text => {
                let prefix = if args.value.is_some() { "Set " } else { "" };
                println!("{}{} = {}", prefix, field.name.bold(), field.value);
                println!("  {}", field.description.dimmed());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_vault() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.md"), "---\ntitle: My Note\n---\nBody\n").unwrap();
        dir
    }

    #[test]
    fn config_set_persists_to_vault_data_file() {
        let dir = sample_vault();
        let args = ConfigArgs { vault: dir.path().to_path_buf(), value: Some("title,name".into()) };
        cmd_config(args, None, &OutputFormat::Text).unwrap();

        let data = fs::read_to_string(dir.path().join(FileSettingsStore::VAULT_RELATIVE_PATH)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value, json!({"keys": "title,name"}));
    }

    #[test]
    fn sync_without_write_leaves_files() {
        let dir = sample_vault();
        let args = SyncArgs { vault: dir.path().to_path_buf(), write: false, keys: None };
        cmd_sync(args, None, &OutputFormat::Json).unwrap();

        let content = fs::read_to_string(dir.path().join("note.md")).unwrap();
        assert_eq!(content, "---\ntitle: My Note\n---\nBody\n");
    }

    #[test]
    fn sync_write_adds_aliases() {
        let dir = sample_vault();
        let args = SyncArgs { vault: dir.path().to_path_buf(), write: true, keys: None };
        cmd_sync(args, None, &OutputFormat::Text).unwrap();

        let content = fs::read_to_string(dir.path().join("note.md")).unwrap();
        assert_eq!(content, "---\ntitle: My Note\naliases:\n- My Note\n---\nBody\n");
    }

    #[test]
    fn sync_uses_explicit_settings_file() {
        let dir = sample_vault();
        let settings = dir.path().join("custom.json");
        fs::write(&settings, r#"{"keys": "missing"}"#).unwrap();

        let args = SyncArgs { vault: dir.path().to_path_buf(), write: true, keys: None };
        cmd_sync(args, Some(&settings), &OutputFormat::Text).unwrap();

        let content = fs::read_to_string(dir.path().join("note.md")).unwrap();
        assert_eq!(content, "---\ntitle: My Note\n---\nBody\n");
    }

    #[test]
    fn lookup_runs_on_missing_name() {
        let dir = sample_vault();
        let args = LookupArgs { vault: dir.path().to_path_buf(), name: "nothing".into() };
        cmd_lookup(args, None, &OutputFormat::Text).unwrap();
    }
}
