//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile, Scheme};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            scheme,
            endpoint,
        } => set_profile(config, name, scheme, endpoint, formatter),
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
        println!("    Scheme: {}", scheme_label(profile.scheme));
        println!("    Endpoint: {}", profile.endpoint);
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  Scheme: {}", scheme_label(profile.scheme));
    println!("  Endpoint: {}", profile.endpoint);

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
    scheme: Scheme,
    endpoint: String,
    formatter: &Formatter,
) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(CliError::InvalidInput("Endpoint must not be empty".to_string()));
    }

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), Profile { scheme, endpoint });
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

fn scheme_label(scheme: Scheme) -> &'static str {
    match scheme {
        Scheme::TagCode => "tag-code",
        Scheme::Generative => "generative",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn temp_config(dir: &std::path::Path) -> Config {
        Config::load_from(&dir.join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_switch_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Table, false);

        set_profile(
            &mut config,
            "local".to_string(),
            Scheme::Generative,
            "http://localhost:8080/generate".to_string(),
            &formatter,
        )
        .unwrap();
        assert!(config.profiles.contains_key("local"));

        switch_profile(&mut config, "local".to_string(), &formatter).unwrap();
        assert_eq!(config.active_profile, "local");

        let reloaded = temp_config(dir.path());
        assert_eq!(reloaded.active_profile, "local");
    }

    #[test]
    fn test_delete_active_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "gemini".to_string(), &formatter);
        assert!(matches!(result, Err(CliError::NotPermitted(_))));
    }

    #[test]
    fn test_delete_legacy_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Table, false);

        delete_profile(&mut config, "meaningcloud".to_string(), &formatter).unwrap();
        assert!(!config.profiles.contains_key("meaningcloud"));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(dir.path());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = set_profile(
            &mut config,
            "blank".to_string(),
            Scheme::TagCode,
            " ".to_string(),
            &formatter,
        );
        assert!(result.is_err());
    }
}
