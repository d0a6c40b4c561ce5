use std::path::PathBuf;

use crate::error::Result;
use crate::i18n::Language;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, language: Option<Language>, currency: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(lang) = language {
        settings.language = lang;
    }
    if let Some(symbol) = currency {
        settings.currency = symbol;
    }

    let dir = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&dir)?;
    save_settings(&settings)?;

    println!("Data directory: {}", dir.display());
    println!("Master table:   {}", settings.master_path().display());
    println!("Language:       {}", settings.language.display_name());
    println!("Currency:       {}", settings.currency);
    Ok(())
}
