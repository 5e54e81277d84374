mod cli;

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use cli::{AnnotateArgs, Cli, Commands, RuleArgs};
use miette::{IntoDiagnostic, Result, WrapErr};
use zonelabel::{
    Annotation, Label, Rules, Settings, Sheet, SplitFallback, TagSet, annotate, annotate_drawing,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Annotate(args) => run_annotate(args),
        Commands::Classify { labels, rules } => run_classify(&labels, &rules),
    }
}

/// Log to stderr, or to `log_file` without colors.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into())
    };

    match log_file {
        Some(path) => {
            let file = fs::File::create(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn rules(args: &RuleArgs) -> Result<Rules> {
    Ok(Rules::new(args.delimiter, TagSet::default(), args.displacement)?)
}

fn run_annotate(args: AnnotateArgs) -> Result<()> {
    let settings = Settings {
        rules: rules(&args.rules)?,
        dry_run: args.dry_run,
        fallback: if args.keep_rejected {
            SplitFallback::Untouched
        } else {
            SplitFallback::Normalize
        },
        ignore_layers: args.ignore_layers,
    };

    let source = fs::read_to_string(&args.sheet)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.sheet.display()))?;
    let mut sheet = Sheet::parse(args.sheet.display().to_string(), &source)?;

    let summary = annotate_drawing(&mut sheet, &settings)?;
    println!("{summary}");

    if !settings.dry_run {
        let output = args.output.as_deref().unwrap_or(args.sheet.as_path());
        fs::write(output, sheet.to_string())
            .into_diagnostic()
            .wrap_err_with(|| format!("writing {}", output.display()))?;
    }
    Ok(())
}

fn run_classify(labels: &[String], args: &RuleArgs) -> Result<()> {
    let rules = rules(args)?;
    for raw in labels {
        let line = match Label::new(raw) {
            Some(label) => describe(&annotate(&label, &rules, SplitFallback::Normalize)?),
            None => "blank".to_string(),
        };
        println!("{raw:?} -> {line}");
    }
    Ok(())
}

fn describe(annotation: &Annotation) -> String {
    let line = match annotation {
        Annotation::Split(split) => split
            .iter()
            .map(|part| format!("{} @ {}", part.label, part.offset))
            .collect::<Vec<_>>()
            .join(", "),
        Annotation::Normalized { label, .. } => format!("{label} [{}]", label.zoning()),
        Annotation::NoRule { .. } => "no rule".to_string(),
    };
    match annotation.rejected_split() {
        Some(reason) => format!("{line} (not split: {reason})"),
        None => line,
    }
}
