//! @dose
//! purpose: This module implements the translate command. It loads the config, builds a
//!     Translator, reads text from arguments or stdin and prints each translation as plain
//!     text or JSON.
//!
//! when-editing:
//!     - !Argument words are joined with single spaces before translating
//!     - !--lines translates stdin lines independently and in parallel; output order is input order
//!     - Best-effort output is printed for translations that cannot fit unless --strict is set
//!
//! invariants:
//!     - Exactly one output record per translated input
//!     - The process fails under --strict if any translation exceeded the limit
//!
//! gotchas:
//!     - A single trailing newline is dropped from stdin when translating it as one text
//!     - An explicit --config path must exist; the default martian.toml is optional
//!
//! flows:
//!     - Configure: martian.toml or --config, then --limit override
//!     - Read: arguments, or stdin (whole or per line)
//!     - Translate: rayon over inputs, keeping best-effort text on InsufficientSalvage
//!     - Write: text or JSON lines to stdout

use crate::cli::TranslateArgs;
use crate::config::Config;
use crate::translator::Translator;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::Path;

/// One translated input, as printed by --json
#[derive(Debug, Serialize)]
pub struct TranslationReport {
    pub input: String,
    pub output: String,
    pub length: usize,
    pub limit: usize,
    pub fitted: bool,
}

impl TranslationReport {
    fn new(translator: &Translator, input: &str) -> Self {
        let (output, fitted) = match translator.translate(input) {
            Ok(output) => (output, true),
            Err(e) => {
                log::warn!("{}", e);
                (e.best_effort().to_string(), false)
            }
        };
        Self {
            input: input.to_string(),
            length: output.chars().count(),
            output,
            limit: translator.limit(),
            fitted,
        }
    }
}

pub fn run_translate(args: &TranslateArgs, root: &Path) -> Result<()> {
    let config = match args.config {
        Some(ref path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            Config::load_from(&path).context("Failed to load config")?
        }
        None => Config::load(root),
    };

    let mut translator = config.translator();
    if let Some(limit) = args.limit {
        translator = translator.with_limit(limit);
    }

    let inputs = if args.reads_stdin() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        split_inputs(&buffer, args.lines)
    } else {
        vec![args.text.join(" ")]
    };

    let reports = translate_all(&translator, &inputs);

    let mut stdout = io::stdout().lock();
    write_reports(&reports, args.json, &mut stdout)?;

    let unfitted = reports.iter().filter(|report| !report.fitted).count();
    if args.strict && unfitted > 0 {
        bail!(
            "{} translation(s) could not fit within {} characters",
            unfitted,
            translator.limit()
        );
    }
    Ok(())
}

/// Turn raw stdin into the texts to translate
fn split_inputs(buffer: &str, lines: bool) -> Vec<String> {
    if lines {
        return buffer.lines().map(String::from).collect();
    }
    let text = buffer
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(buffer);
    vec![text.to_string()]
}

/// Translate every input, in parallel, preserving order
pub fn translate_all(translator: &Translator, inputs: &[String]) -> Vec<TranslationReport> {
    inputs
        .par_iter()
        .map(|input| TranslationReport::new(translator, input))
        .collect()
}

fn write_reports(reports: &[TranslationReport], json: bool, out: &mut impl Write) -> Result<()> {
    for report in reports {
        if json {
            let line = serde_json::to_string(report).context("Failed to serialize translation")?;
            writeln!(out, "{}", line).context("Failed to write to stdout")?;
        } else {
            writeln!(out, "{}", report.output).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vocabulary;

    fn translator() -> Translator {
        let vocabulary: Vocabulary = [("joe", "biden")].into_iter().collect();
        Translator::new(vocabulary)
    }

    // ==================== split_inputs Tests ====================

    #[test]
    fn test_split_inputs_whole_text() {
        assert_eq!(split_inputs("one\ntwo\n", false), vec!["one\ntwo"]);
        assert_eq!(split_inputs("crlf\r\n", false), vec!["crlf"]);
        assert_eq!(split_inputs("bare", false), vec!["bare"]);
    }

    #[test]
    fn test_split_inputs_lines() {
        assert_eq!(split_inputs("one\ntwo\n", true), vec!["one", "two"]);
        assert!(split_inputs("", true).is_empty());
    }

    // ==================== translate_all Tests ====================

    #[test]
    fn test_translate_all_keeps_order() {
        let inputs: Vec<String> = (0..50).map(|i| format!("Joe {}", i)).collect();
        let reports = translate_all(&translator(), &inputs);
        assert_eq!(reports.len(), 50);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.output, format!("Biden {}", i));
            assert!(report.fitted);
        }
    }

    #[test]
    fn test_translate_all_reports_unfitted() {
        let reports = translate_all(&translator().with_limit(3), &["Wonderful!".to_string()]);
        assert!(!reports[0].fitted);
        assert_eq!(reports[0].output, "Ackackack!");
        assert_eq!(reports[0].length, 10);
        assert_eq!(reports[0].limit, 3);
    }

    // ==================== write_reports Tests ====================

    #[test]
    fn test_write_reports_text() {
        let reports = translate_all(&translator(), &["Joe".to_string(), "weak".to_string()]);
        let mut out = Vec::new();
        write_reports(&reports, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Biden\nack\n");
    }

    #[test]
    fn test_write_reports_json() {
        let reports = translate_all(&translator(), &["Joe".to_string()]);
        let mut out = Vec::new();
        write_reports(&reports, true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["input"], "Joe");
        assert_eq!(value["output"], "Biden");
        assert_eq!(value["length"], 5);
        assert_eq!(value["limit"], 280);
        assert_eq!(value["fitted"], true);
    }
}
