use parley_core::config::{normalize_base_url, normalize_text_option};

use crate::commands::common::{resolve_base_url, ConnectionArgs};
use crate::config_profiles::{default_config_path, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config_init(
    profile_name: Option<&str>,
    base_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let base_url = normalize_profile_base_url(base_url)?;
    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(value) = base_url {
        profile.base_url = Some(value);
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let profile = config
        .profile(&profile_name)
        .ok_or_else(|| CliError::Config("Failed to persist profile".to_string()))?;
    if profile.base_url().is_none() {
        println!("Profile '{profile_name}' has no base_url; the default backend will be used");
    }

    Ok(())
}

pub fn normalize_profile_base_url(base_url: Option<String>) -> Result<Option<String>, CliError> {
    normalize_text_option(base_url)
        .map(|url| {
            normalize_base_url(&url)
                .map_err(|error| CliError::Config(format!("base_url: {error}")))
        })
        .transpose()
}

pub fn run_config_show(connection: &ConnectionArgs) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(connection.profile.as_deref());
    let (base_url, source) = resolve_base_url(connection)?;

    println!(
        "config file: {}",
        default_config_path().map_err(CliError::Config)?.display()
    );
    println!("profile:     {profile_name}");
    println!("base_url:    {base_url} ({})", source.label());
    Ok(())
}
