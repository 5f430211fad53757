//! dialoguer prompts used to fill in forms.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Password, Select};

pub fn text(prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

/// Blank answers become `None`.
pub fn optional(prompt: &str, initial: Option<&str>) -> Result<Option<String>> {
    let value = text(prompt, initial.unwrap_or_default())?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::new().with_prompt(prompt).interact()?)
}

pub fn number(prompt: &str, initial: f64) -> Result<f64> {
    Ok(Input::<f64>::new()
        .with_prompt(prompt)
        .default(initial)
        .interact_text()?)
}

pub fn count(prompt: &str, initial: u32) -> Result<u32> {
    Ok(Input::<u32>::new()
        .with_prompt(prompt)
        .default(initial)
        .interact_text()?)
}

/// A `YYYY-MM-DD` date; blank answers become `None`.
pub fn date(prompt: &str, initial: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let initial = initial.map(|d| d.to_string()).unwrap_or_default();
    let value = Input::<String>::new()
        .with_prompt(format!("{prompt} (YYYY-MM-DD)"))
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() || parse_date(input).is_some() {
                Ok(())
            } else {
                Err("Use the YYYY-MM-DD format".to_string())
            }
        })
        .interact_text()?;
    Ok(parse_date(&value))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()?)
}

/// Pick one `(uuid, label)` option and return its uuid. Falls back to typing
/// the uuid when there is nothing to choose from.
pub fn choose(prompt: &str, options: &[(String, String)], initial: &str) -> Result<String> {
    if options.is_empty() {
        return text(&format!("{prompt} UUID"), initial);
    }
    let labels = options.iter().map(|(_, label)| label.clone()).collect::<Vec<_>>();
    let default = options
        .iter()
        .position(|(uuid, _)| uuid == initial)
        .unwrap_or(0);
    let index = select(prompt, &labels, default)?;
    Ok(options[index].0.clone())
}

/// Comma-separated file paths.
pub fn files(prompt: &str) -> Result<Vec<PathBuf>> {
    let value = text(prompt, "")?;
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect())
}
