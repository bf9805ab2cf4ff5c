//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use credify_sdk::CredifyClient;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            history_limit,
        } => set_profile(config, name, url, history_limit, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    println!("Available profiles:");
    for name in names {
        let profile = &config.profiles[name];
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        println!("    URL: {}", profile.api_url);
        println!("    History limit: {}", profile.history_limit);
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  URL: {}", profile.api_url);
    println!("  History limit: {}", profile.history_limit);

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    url: String,
    history_limit: Option<usize>,
    formatter: &Formatter,
) -> Result<()> {
    // Reject URLs the client could never use
    CredifyClient::new(&url)?;

    let mut profile = Profile::new(url.trim());
    if let Some(limit) = history_limit {
        if limit == 0 {
            return Err(CliError::InvalidInput(
                "History limit must be at least 1".to_string(),
            ));
        }
        profile.history_limit = limit;
    }

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn temp_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        (dir, config)
    }

    #[test]
    fn test_set_and_switch_profile() {
        let (dir, mut config) = temp_config();
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "local".to_string(),
            "http://localhost:8000".to_string(),
            Some(25),
            &formatter,
        )
        .unwrap();
        assert_eq!(config.profiles["local"].history_limit, 25);

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(reloaded.active_profile, "local");
    }

    #[test]
    fn test_set_profile_rejects_bad_input() {
        let (_dir, mut config) = temp_config();
        let formatter = Formatter::new(OutputFormat::Table, false);

        assert!(set_profile(&mut config, "x".to_string(), "nope".to_string(), None, &formatter).is_err());
        assert!(set_profile(
            &mut config,
            "x".to_string(),
            "http://localhost:8000".to_string(),
            Some(0),
            &formatter
        )
        .is_err());
        assert!(!config.profiles.contains_key("x"));
    }

    #[test]
    fn test_delete_active_profile() {
        let (_dir, mut config) = temp_config();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(result.is_err());
    }
}
