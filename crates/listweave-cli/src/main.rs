use anyhow::{Context, Result};
use listweave_config::Config;
use listweave_engine::fixer::{self, Correction};
use listweave_engine::{ListDocument, Record, format_outline, from_markup, parse_html, to_html};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

/// What to print for the normalized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// The records, in outline notation.
    Outline,
    /// The nested projection as HTML.
    Html,
    /// The nested projection, one node per line.
    Tree,
    /// Only the corrections the fixer would make.
    Check,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    path: PathBuf,
    output: Output,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut output = Output::Outline;
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "--html" => output = Output::Html,
            "--tree" => output = Output::Tree,
            "--check" => output = Output::Check,
            flag if flag.starts_with("--") => return None,
            file if path.is_none() => path = Some(PathBuf::from(file)),
            _ => return None,
        }
    }
    Some(Args { path: path?, output })
}

/// Parses the full argv, program name included.
fn parse_argv(argv: &[String]) -> Option<Args> {
    parse_args(argv.get(1..).unwrap_or_default())
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

fn read_records(path: &Path, config: &Config) -> Result<Vec<Record>> {
    let input =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    if is_html(path) {
        Ok(from_markup(&parse_html(&input)))
    } else {
        Ok(config.outline.parse(&input))
    }
}

fn describe(correction: &Correction) -> String {
    let (before, after) = (correction.before, correction.after);
    let mut changes = Vec::new();
    if before.indent != after.indent {
        changes.push(format!("indent {} -> {}", before.indent, after.indent));
    }
    if before.list_type != after.list_type {
        changes.push(format!("type {} -> {}", before.list_type, after.list_type));
    }
    if before.style != after.style {
        match after.style {
            Some(style) => changes.push(format!("style {}", style.as_str())),
            None => changes.push("style cleared".to_string()),
        }
    }
    format!("record {}: {}", correction.record, changes.join(", "))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(cli) = parse_argv(&args) else {
        eprintln!("Usage: listweave-cli [--html | --tree | --check] <file>");
        eprintln!("Reads an outline (or an .html file) and prints it normalized");
        process::exit(1);
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Using config file {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let records = read_records(&cli.path, &config)?;

    if cli.output == Output::Check {
        let mut fixed = records;
        let corrections = fixer::fix_document(&mut fixed);
        for correction in &corrections {
            println!("{}", describe(correction));
        }
        if !corrections.is_empty() {
            log::info!("{} records need fixing", corrections.len());
            process::exit(1);
        }
        return Ok(());
    }

    let doc = ListDocument::from_records(records).with_options(config.engine);
    log::info!(
        "Loaded {} records into {} root nodes",
        doc.records().len(),
        doc.tree().roots.len()
    );

    match cli.output {
        Output::Outline => print!("{}", config.outline.render(doc.records())),
        Output::Html => println!("{}", to_html(&doc.to_markup())),
        Output::Tree => print!("{}", format_outline(doc.tree())),
        Output::Check => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use listweave_engine::{ListAttributes, ListStyle, ListType};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse_args(&args(&["--html", "notes.txt"])),
            Some(Args {
                path: PathBuf::from("notes.txt"),
                output: Output::Html,
            })
        );
        assert_eq!(
            parse_args(&args(&["notes.txt"])).map(|cli| cli.output),
            Some(Output::Outline)
        );
        assert_eq!(parse_args(&args(&[])), None);
        assert_eq!(parse_args(&args(&["a.txt", "b.txt"])), None);
        assert_eq!(parse_args(&args(&["--verbose", "a.txt"])), None);
    }

    #[test]
    fn test_missing_program_name_is_a_usage_error() {
        assert_eq!(parse_argv(&[]), None);
        assert_eq!(parse_argv(&args(&["listweave-cli"])), None);
        assert_eq!(
            parse_argv(&args(&["listweave-cli", "--tree", "a.txt"])).map(|cli| cli.output),
            Some(Output::Tree)
        );
    }

    #[test]
    fn test_html_detection() {
        assert!(is_html(Path::new("page.HTML")));
        assert!(is_html(Path::new("dir/page.htm")));
        assert!(!is_html(Path::new("notes.txt")));
        assert!(!is_html(Path::new("html")));
    }

    #[test]
    fn test_describe_correction() {
        let correction = Correction {
            record: 3,
            before: ListAttributes::new(ListType::Bulleted, 4),
            after: ListAttributes::new(ListType::Numbered, 2),
        };
        assert_eq!(
            describe(&correction),
            "record 3: indent 4 -> 2, type bulleted -> numbered"
        );

        let restyled = Correction {
            record: 1,
            before: ListAttributes::new(ListType::Bulleted, 1).with_style(ListStyle::Circle),
            after: ListAttributes::new(ListType::Bulleted, 1).with_style(ListStyle::Square),
        };
        assert_eq!(describe(&restyled), "record 1: style square");
    }
}
