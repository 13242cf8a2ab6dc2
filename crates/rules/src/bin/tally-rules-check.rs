//! tally-rules-check — validate a rules file and preview row colors.
//!
//! Loads rules from JSON or YAML, validates each one, and prints a report.
//! With `--entries`, also shows which rule colors each entry.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use tally_core::{config, Config, RandomIds};
use tally_rules::criteria::CriteriaFactory;
use tally_rules::loader::{load_entries, load_rules};
use tally_rules::rule::{first_matching, invalid_count};
use tally_rules::Rule;

// ── CLI ─────────────────────────────────────────────────────────────

/// Validate timesheet styling rules and preview which rows they color.
#[derive(Parser, Debug)]
#[command(name = "tally-rules-check", version, about)]
struct Cli {
    /// Rules file (`.json`, `.yml` or `.yaml`).
    #[arg(long, env = "TALLY_RULES_FILE")]
    rules: PathBuf,

    /// JSON array of timesheet entries to color.
    #[arg(long)]
    entries: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Exit with an error when any rule is invalid.
    #[arg(long)]
    strict: bool,
}

// ── Report ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Report {
    rules: Vec<RuleReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<EntryReport>,
}

#[derive(Serialize)]
struct RuleReport {
    index: usize,
    id: String,
    color: Option<String>,
    rule_type: String,
    valid: bool,
    errors: Vec<String>,
}

#[derive(Serialize)]
struct EntryReport {
    index: usize,
    rule: Option<usize>,
    color: Option<String>,
}

fn print_text(report: &Report) {
    for rule in &report.rules {
        let status = if rule.valid { "ok" } else { "INVALID" };
        println!(
            "rule {:>3}  {:<8} {:<8} {:<4} {}",
            rule.index,
            status,
            rule.color.as_deref().unwrap_or("-"),
            rule.rule_type,
            rule.id
        );
        for error in &rule.errors {
            println!("           - {error}");
        }
    }
    for entry in &report.entries {
        match (entry.rule, entry.color.as_deref()) {
            (Some(rule), Some(color)) => println!("entry {:>3}  rule {rule} {color}", entry.index),
            _ => println!("entry {:>3}  (no rule)", entry.index),
        }
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    config.log_summary();

    let factory = CriteriaFactory::from_config(&config.rules);
    let data = load_rules(&cli.rules)
        .with_context(|| format!("failed to load rules from {}", cli.rules.display()))?;

    let mut rules: Vec<Rule> = data
        .into_iter()
        .map(|d| Rule::build(d, &factory, &RandomIds))
        .collect();

    let rule_reports: Vec<RuleReport> = rules
        .iter_mut()
        .enumerate()
        .map(|(index, rule)| {
            let valid = rule.is_valid();
            if !valid {
                warn!(index, rule_id = %rule.id(), errors = ?rule.error_messages(), "invalid rule");
            }
            RuleReport {
                index,
                id: rule.id().to_string(),
                color: rule.color().map(str::to_string),
                rule_type: rule.criteria().rule_type().to_string(),
                valid,
                errors: rule.error_messages().into_iter().map(str::to_string).collect(),
            }
        })
        .collect();

    let entries = match &cli.entries {
        Some(path) => load_entries(path)
            .with_context(|| format!("failed to load entries from {}", path.display()))?,
        None => Vec::new(),
    };

    let entry_reports: Vec<EntryReport> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match first_matching(&rules, entry) {
            Some((rule_index, rule)) => EntryReport {
                index,
                rule: Some(rule_index),
                color: rule.color().map(str::to_string),
            },
            None => EntryReport {
                index,
                rule: None,
                color: None,
            },
        })
        .collect();

    let invalid = invalid_count(&rules);
    info!(
        rules = rule_reports.len(),
        invalid,
        entries = entry_reports.len(),
        "check complete"
    );

    let report = Report {
        rules: rule_reports,
        entries: entry_reports,
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    if cli.strict && invalid > 0 {
        bail!("{invalid} invalid rule(s)");
    }
    Ok(())
}
