use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use is_terminal::IsTerminal;
use neatfmt::{
    highlight, Dialect, FixKind, HighlightSpan, JsonFormatter, KeywordCase, SpanKind,
    SqlFormatter,
};

/// Format JSON, SQL, or MongoDB queries from the terminal.
///
/// nfmt reads from stdin or files and writes formatted output to stdout.
/// The JSON mode repairs common damage (BOM marks, escaped documents,
/// stray newlines) before formatting; the SQL mode re-cases keywords and
/// lays out one clause per line.
#[derive(Parser, Debug)]
#[command(name = "nfmt")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s). If not specified, reads from stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input language.
    #[arg(short, long, value_enum, default_value = "json")]
    lang: LangArg,

    /// Compress JSON output instead of indenting it.
    #[arg(short, long)]
    compact: bool,

    /// Number of spaces per indentation level (JSON only).
    #[arg(short, long, default_value = "4", value_parser = ["2", "4", "8"])]
    indent: String,

    /// Lowercase SQL keywords instead of uppercasing them.
    #[arg(long)]
    lowercase: bool,

    /// Blank lines between SQL statements.
    #[arg(long, default_value = "1")]
    gap: usize,

    /// Apply a repair step (JSON only) and print its log to stderr.
    #[arg(long, value_enum)]
    fix: Option<FixArg>,

    /// Colorize SQL/Mongo output when stdout is a terminal.
    #[arg(long)]
    highlight: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
    Json,
    Sql,
    Mongo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FixArg {
    All,
    RemoveBom,
    TrimWhitespace,
    FixEscapedJson,
    FixNewlines,
    NormalizeNewlines,
    RemoveEmptyLines,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("nfmt: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = if args.files.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        let mut combined = String::new();
        for path in &args.files {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
            combined.push_str(&content);
        }
        combined
    };

    // A failed fix still surfaces the partially-repaired text before the
    // error is reported, so the caller can keep working on it.
    let mut fix_error = None;
    let output = match args.lang {
        LangArg::Json => match args.fix {
            Some(fix) => {
                let report = json_formatter(&args).fix(&input, fix_kind(fix));
                for line in &report.log {
                    eprintln!("nfmt: {}", line);
                }
                fix_error = report.error;
                report.text
            }
            None => format_json(&args, &input)?,
        },
        LangArg::Sql => format_sql(&args, &input, Dialect::MySql)?,
        LangArg::Mongo => format_sql(&args, &input, Dialect::Mongo)?,
    };

    if let Some(path) = args.output {
        fs::write(&path, &output)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?;
    } else {
        io::stdout().write_all(output.as_bytes())?;
        if !output.ends_with('\n') {
            io::stdout().write_all(b"\n")?;
        }
    }

    match fix_error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn json_formatter(args: &Args) -> JsonFormatter {
    let mut formatter = JsonFormatter::new();
    formatter.options.indent_spaces = args.indent.parse().unwrap_or(4);
    formatter.options.compress = args.compact;
    formatter
}

fn format_json(args: &Args, input: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(json_formatter(args).reformat(input)?)
}

fn format_sql(
    args: &Args,
    input: &str,
    dialect: Dialect,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut formatter = SqlFormatter::new();
    formatter.options.dialect = dialect;
    formatter.options.blank_lines_between = args.gap;
    formatter.options.keyword_case = if args.lowercase {
        KeywordCase::Lower
    } else {
        KeywordCase::Upper
    };

    let formatted = formatter.reformat(input)?;
    if args.highlight && io::stdout().is_terminal() {
        return Ok(colorize(&formatted, dialect));
    }
    Ok(formatted)
}

fn fix_kind(arg: FixArg) -> FixKind {
    match arg {
        FixArg::All => FixKind::All,
        FixArg::RemoveBom => FixKind::RemoveBom,
        FixArg::TrimWhitespace => FixKind::TrimWhitespace,
        FixArg::FixEscapedJson => FixKind::FixEscapedJson,
        FixArg::FixNewlines => FixKind::FixNewlines,
        FixArg::NormalizeNewlines => FixKind::NormalizeNewlines,
        FixArg::RemoveEmptyLines => FixKind::RemoveEmptyLines,
    }
}

fn colorize(text: &str, dialect: Dialect) -> String {
    const RESET: &str = "\x1b[0m";
    let spans_per_line = highlight(text, dialect);
    let mut out = String::with_capacity(text.len() * 2);
    for (line, spans) in text.lines().zip(spans_per_line) {
        let mut cursor = 0;
        for HighlightSpan { start, end, kind } in spans {
            out.push_str(&line[cursor..start]);
            out.push_str(color_code(kind));
            out.push_str(&line[start..end]);
            out.push_str(RESET);
            cursor = end;
        }
        out.push_str(&line[cursor..]);
        out.push('\n');
    }
    out
}

fn color_code(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::Keyword => "\x1b[1;34m",
        SpanKind::Function => "\x1b[36m",
        SpanKind::StringLit => "\x1b[32m",
        SpanKind::NumberLit => "\x1b[33m",
    }
}
