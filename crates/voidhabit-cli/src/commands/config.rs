use clap::Subcommand;

use voidhabit_core::storage::Profile;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current profile
    Show,
    /// Set a profile field by its TOML key
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Show => {
            let profile = Profile::load()?;
            print_json(&profile)?;
        }
        ConfigAction::Set { key, value } => {
            let mut profile = Profile::load()?;
            profile.set_key(&key, &value)?;
            profile.save()?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
