//! Minimal `--flag [value]` argument reader for console commands

use std::{collections::HashMap, str::FromStr};

use crate::error::{AppError, AppResult};

/// Flags that take no separate value; `--name=false` turns one off
const SWITCHES: &[&str] = &["active", "inactive", "expired", "expiring", "wheelchair"];

fn parse_bool(name: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "si" | "sí" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "--{} takes true or false, got {:?}",
            name, raw
        ))),
    }
}

#[derive(Debug, Default)]
pub struct Args {
    positional: Vec<String>,
    flags: HashMap<String, Option<String>>,
}

impl Args {
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> AppResult<Self> {
        let mut args = Args::default();
        let mut iter = raw.iter().map(AsRef::as_ref).peekable();

        while let Some(token) = iter.next() {
            let Some(name) = token.strip_prefix("--") else {
                args.positional.push(token.to_string());
                continue;
            };

            let (name, value) = match name.split_once('=') {
                Some((name, value)) if SWITCHES.contains(&name) => {
                    (name, Some(parse_bool(name, value)?.to_string()))
                }
                Some((name, value)) => (name, Some(value.to_string())),
                None if SWITCHES.contains(&name) => (name, None),
                None => match iter.next_if(|next| !next.starts_with("--")) {
                    Some(value) => (name, Some(value.to_string())),
                    None => return Err(AppError::Validation(format!("--{} needs a value", name))),
                },
            };

            if name.is_empty() {
                return Err(AppError::Validation("empty flag name".to_string()));
            }
            args.flags.insert(name.to_string(), value);
        }

        Ok(args)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positional
    }

    /// Positional argument that must be present
    pub fn required(&self, index: usize, name: &str) -> AppResult<&str> {
        self.positional(index)
            .ok_or_else(|| AppError::Validation(format!("missing <{}>", name)))
    }

    pub fn required_parsed<T: FromStr>(&self, index: usize, name: &str) -> AppResult<T> {
        let raw = self.required(index, name)?;
        raw.parse()
            .map_err(|_| AppError::Validation(format!("invalid <{}>: {}", name, raw)))
    }

    /// Switch turned on, either bare or as `--name=true`
    pub fn switch(&self, name: &str) -> bool {
        self.toggled(name) == Some(true)
    }

    /// Explicit state of a switch; `None` when it was not given
    pub fn toggled(&self, name: &str) -> Option<bool> {
        match self.flags.get(name)? {
            None => Some(true),
            Some(value) => Some(value == "true"),
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(|v| v.as_deref())
    }

    pub fn parsed<T>(&self, name: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.value(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| AppError::Validation(format!("invalid --{} {}: {}", name, raw, e)))
            })
            .transpose()
    }

    /// Flag that must be present, parsed
    pub fn required_flag<T>(&self, name: &str) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parsed(name)?
            .ok_or_else(|| AppError::Validation(format!("missing --{}", name)))
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    /// Flags not in `known`, for an unknown-option error
    pub fn unknown_flags(&self, known: &[&str]) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .flags
            .keys()
            .filter(|k| !known.contains(&k.as_str()))
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }
}
