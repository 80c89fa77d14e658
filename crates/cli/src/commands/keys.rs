//! Keys command: list the configuration keys the bot reads.

use anyhow::Result;
use reelbot_config::ConfigKey;
use serde::Serialize;
use std::io::Write;

use crate::args::OutputFormat;

#[derive(Debug, Clone, Serialize)]
pub struct KeyInfo {
    pub variable: &'static str,
    pub description: &'static str,
}

pub fn key_infos() -> Vec<KeyInfo> {
    ConfigKey::ALL
        .into_iter()
        .map(|key| KeyInfo {
            variable: key.env_var(),
            description: key.display_name(),
        })
        .collect()
}

pub fn run(output: OutputFormat) -> Result<()> {
    let mut out = std::io::stdout().lock();
    write_keys(&mut out, output)
}

fn write_keys<W: Write>(out: &mut W, output: OutputFormat) -> Result<()> {
    let keys = key_infos();
    match output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &keys)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for key in &keys {
                writeln!(out, "{:<16} {}", key.variable, key.description)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lists_every_variable() {
        let mut buf = Vec::new();
        write_keys(&mut buf, OutputFormat::Text).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("DISCORD_TOKEN    Discord bot token"));
        assert!(text.contains("TMDB_API_KEY"));
        assert!(text.contains("COHERE_API_KEY"));
    }

    #[test]
    fn test_json_is_an_array_of_keys() {
        let mut buf = Vec::new();
        write_keys(&mut buf, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        let vars: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k["variable"].as_str().unwrap())
            .collect();
        assert_eq!(vars, vec!["DISCORD_TOKEN", "TMDB_API_KEY", "COHERE_API_KEY"]);
    }
}
