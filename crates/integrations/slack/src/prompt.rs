//! Interactive capture of Slack options.
//!
//! Answers are trimmed and stored as entered; the token and channel IDs
//! are not validated.

use std::io::{BufRead, Write};

use lolslack_core::{ConfigError, PluginConfig};

/// Prompt for `enabled`, then (if enabled) for a token and channel list.
pub fn collect_options(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<PluginConfig, ConfigError> {
    let enabled = ask(input, out, "enabled (true/false): ")?.as_deref() == Some("true");

    if !enabled {
        return Ok(PluginConfig::default());
    }

    let access_token = ask(
        input,
        out,
        "open the url below and issue a token for your user (needs the files:write scope):\n\
         https://api.slack.com/apps\n\
         enter the generated token below, then press enter: (e.g. xxxx-xxxxxxxxx-xxxx)\n",
    )?;

    let channels = ask(
        input,
        out,
        "enter a comma-separated list of channel ids to post images in, then press enter: \
         (e.g. c1234567890,c1234567890)\n\
         note: you must use channel ids (not channel names).\n",
    )?;

    Ok(PluginConfig {
        enabled,
        access_token,
        channels,
    })
}

/// Print `prompt`, read one line, and return it trimmed (`None` if blank).
fn ask(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
) -> Result<Option<String>, ConfigError> {
    out.write_all(prompt.as_bytes())
        .and_then(|()| out.flush())
        .map_err(ConfigError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(ConfigError::Prompt)?;

    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(answers: &str) -> PluginConfig {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        collect_options(&mut input, &mut out).unwrap()
    }

    #[test]
    fn collects_enabled_token_and_channels() {
        let options = run("true\nabc-def\nc1,c3,c4\n");
        assert_eq!(options, PluginConfig::enabled_with("abc-def", "c1,c3,c4"));
    }

    #[test]
    fn trims_answers() {
        let options = run("  true \n  abc-def\t\n c1,c3 \n");
        assert_eq!(options, PluginConfig::enabled_with("abc-def", "c1,c3"));
    }

    #[test]
    fn disabled_skips_remaining_prompts() {
        let mut input = Cursor::new(b"false\nabc-def\nc1\n".to_vec());
        let mut out = Vec::new();
        let options = collect_options(&mut input, &mut out).unwrap();

        assert_eq!(options, PluginConfig::default());
        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains("token"));
    }

    #[test]
    fn blank_answers_are_absent() {
        let options = run("true\n\n\n");
        assert!(options.is_enabled());
        assert!(options.access_token.is_none());
        assert!(options.channels.is_none());
        assert!(!options.is_configured());
    }

    #[test]
    fn end_of_input_is_blank() {
        let options = run("true\ntok");
        assert_eq!(options.access_token.as_deref(), Some("tok"));
        assert!(options.channels.is_none());
    }
}
