//! Fields command - show what a field set extracts and how.

use clap::Args;
use console::style;

use certx_core::extraction::{Accept, Capture, LabelMatch, LineRule};
use certx_core::{FieldSet, FieldSetVersion, MatchMode};

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Field set to describe [default: from config]
    #[arg(long)]
    field_set: Option<FieldSetVersion>,
}

pub async fn run(args: FieldsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let version = match args.field_set {
        Some(version) => version,
        None => super::config::load(config_path)?.extraction.field_set,
    };
    let field_set = FieldSet::builtin(version);

    let mode = match field_set.mode() {
        MatchMode::DotAll => "dot matches newline",
        MatchMode::LineAnchored => "line anchored",
    };
    println!(
        "{} Field set {} ({}, case-insensitive)",
        style("ℹ").blue(),
        style(version).bold(),
        mode
    );
    println!();

    for field in field_set.fields() {
        if field.column() == field.name() {
            println!("{}", style(field.column()).cyan());
        } else {
            println!("{} (field {})", style(field.column()).cyan(), field.name());
        }
        for pattern in field.patterns() {
            println!("    {}", pattern.as_str());
        }
    }

    println!();
    println!("{}", style("Line rules:").bold());
    for rule in field_set.line_rules() {
        println!("  {}", describe_rule(rule));
    }

    Ok(())
}

fn describe_rule(rule: &LineRule) -> String {
    let label = match rule.matcher {
        LabelMatch::Contains => format!("line contains \"{}\"", rule.label),
        LabelMatch::StartsWith => format!("line starts with \"{}\"", rule.label),
    };

    let value = match rule.capture {
        Capture::SameLine { .. } => "rest of the line".to_string(),
        Capture::NextLine { offset, accept } => {
            let position = if offset == 1 {
                "next line".to_string()
            } else {
                format!("line +{}", offset)
            };
            match accept {
                Accept::Any => position,
                Accept::NonEmptyWithout(tokens) => format!("{}, unless it contains {}", position, tokens.join("/")),
                Accept::Digits { exact: Some(n) } => format!("{} if {} digits", position, n),
                Accept::Digits { exact: None } => format!("{} if digits", position),
            }
        }
    };

    format!("{}: {} -> {}", rule.field, label, value)
}
