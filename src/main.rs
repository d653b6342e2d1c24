use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use quillcheck::assertion::{AssertionError, Quantifier, Selector, Session};
use quillcheck::config::{Config, RenderFormat};
use quillcheck::document::node::{Kind, TreeValue};
use quillcheck::document::parser::parse_yaml;
use quillcheck::file::loader::{load_tree_file, load_tree_from_stdin};
use quillcheck::querypath::{self, Path};
use quillcheck::report::Reporter;

/// QuillCheck - fluent content assertions over YAML and JSON data trees
#[derive(Parser, Debug)]
#[command(name = "quillcheck")]
#[command(version)]
#[command(
    about = "Check quantified assertions against a YAML or JSON document",
    long_about = None
)]
struct Cli {
    /// Data file to check (omit or use '-' to read from stdin)
    #[arg(short, long)]
    file: Option<String>,

    /// Path prefix applied to every query
    #[arg(long, default_value = "")]
    prefix: String,

    /// Path to select, e.g. "members [instrument=bass] name"
    #[arg(short, long, default_value = "")]
    path: String,

    /// How many units of the selection must match
    #[arg(short, long, value_enum, default_value_t = QuantifierArg::One)]
    quantifier: QuantifierArg,

    /// Count for exactly, at-least and at-most
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Render format for failure reports (overrides the config file)
    #[arg(long)]
    format: Option<RenderFormat>,

    /// Assertion to run
    #[arg(value_enum)]
    verb: Verb,

    /// Expected content, each parsed as a YAML literal; several values are
    /// checked one after another
    content: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum QuantifierArg {
    Select,
    EveryExistent,
    Every,
    Exactly,
    AtLeast,
    AtMost,
    One,
    Some,
    No,
}

impl QuantifierArg {
    fn with_count(self, count: usize) -> Quantifier {
        match self {
            QuantifierArg::Select => Quantifier::Default,
            QuantifierArg::EveryExistent => Quantifier::EveryExistent,
            QuantifierArg::Every => Quantifier::Every,
            QuantifierArg::Exactly => Quantifier::Exactly(count),
            QuantifierArg::AtLeast => Quantifier::AtLeast(count),
            QuantifierArg::AtMost => Quantifier::AtMost(count),
            QuantifierArg::One => Quantifier::One,
            QuantifierArg::Some => Quantifier::Some,
            QuantifierArg::No => Quantifier::No,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Verb {
    Has,
    HasSomeOf,
    HasNot,
    HasNoDuplicates,
    HasNoNones,
    HasLength,
    Matches,
    Is,
    IsNot,
    IsOrdered,
    IsA,
    IsNone,
    IsNotNone,
    IsTrue,
    IsFalse,
    EvalsTrue,
    EvalsFalse,
}

impl Verb {
    /// Whether the verb takes content arguments.
    fn takes_content(self) -> bool {
        matches!(
            self,
            Verb::Has
                | Verb::HasSomeOf
                | Verb::HasNot
                | Verb::HasLength
                | Verb::Matches
                | Verb::Is
                | Verb::IsNot
                | Verb::IsOrdered
                | Verb::IsA
        )
    }
}

fn parse_path(text: &str) -> Result<Path> {
    querypath::Parser::parse(text).with_context(|| format!("Invalid path '{}'", text))
}

fn parse_content(items: &[String]) -> Result<Vec<TreeValue>> {
    items
        .iter()
        .map(|item| parse_yaml(item).with_context(|| format!("Invalid content '{}'", item)))
        .collect()
}

fn single<'a>(verb: Verb, items: &'a [String]) -> Result<&'a str> {
    match items {
        [item] => Ok(item),
        _ => bail!("{:?} takes exactly one content argument", verb),
    }
}

/// Runs the verb; usage errors are reported through the outer result.
fn apply(
    selector: &Selector,
    verb: Verb,
    content: &[String],
) -> Result<Result<(), AssertionError>> {
    if verb.takes_content() && content.is_empty() {
        bail!("{:?} needs at least one content argument", verb);
    }
    if !verb.takes_content() && !content.is_empty() {
        bail!("{:?} takes no content arguments", verb);
    }

    let outcome = match verb {
        Verb::Has => selector.has_all(parse_content(content)?),
        Verb::HasSomeOf => selector.has_some_of_all(parse_content(content)?),
        Verb::HasNot => selector.has_not_all(parse_content(content)?),
        Verb::Is => selector.is_all(parse_content(content)?),
        Verb::IsNot => parse_content(content)?
            .into_iter()
            .try_for_each(|item| selector.is_not(item)),
        Verb::IsOrdered => parse_content(content)?
            .into_iter()
            .try_for_each(|item| selector.is_ordered(item)),
        Verb::Matches => selector.matches_all(content.iter().map(String::as_str)),
        Verb::HasLength => {
            let length = single(verb, content)?;
            let length: usize = length
                .parse()
                .with_context(|| format!("Invalid length '{}'", length))?;
            selector.has_length(length)
        }
        Verb::IsA => {
            let kind: Kind = single(verb, content)?
                .parse()
                .map_err(anyhow::Error::msg)?;
            selector.is_a(kind)
        }
        Verb::HasNoDuplicates => selector.has_no_duplicates(),
        Verb::HasNoNones => selector.has_no_nones(),
        Verb::IsNone => selector.is_none(),
        Verb::IsNotNone => selector.is_not_none(),
        Verb::IsTrue => selector.is_true(),
        Verb::IsFalse => selector.is_false(),
        Verb::EvalsTrue => selector.evals_true(),
        Verb::EvalsFalse => selector.evals_false(),
    };
    Ok(outcome)
}

fn load_tree(file: Option<&str>) -> Result<TreeValue> {
    match file {
        Some(path) if path != "-" => load_tree_file(path),
        _ => {
            if io::stdin().is_terminal() {
                bail!("No input: pass --file or pipe a document on stdin");
            }
            load_tree_from_stdin()
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load();
    if let Some(format) = cli.format {
        config.format = format;
    }

    let tree = load_tree(cli.file.as_deref())?;
    let session = Session::with_prefix(tree, parse_path(&cli.prefix)?);
    let path = parse_path(&cli.path)?;
    let quantifier = cli.quantifier.with_count(cli.count);
    debug!("Checking {} {} {:?}", quantifier, path, cli.verb);

    let selector = match session.quantify(quantifier, path) {
        Ok(selector) => selector,
        Err(failure) => return report(config, &failure),
    };

    match apply(&selector, cli.verb, &cli.content)? {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(failure) => report(config, &failure),
    }
}

fn report(config: Config, failure: &AssertionError) -> Result<ExitCode> {
    let report = Reporter::new(config).render_error(failure)?;
    eprint!("{}", report);
    Ok(ExitCode::from(1))
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
