use clap::Parser;
use schemaform::form::ErrorPolicy;
use schemaform::runtime::{FormApp, Runtime};
use schemaform::schema::{self, Schema};
use schemaform::terminal::Terminal;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Render an interactive terminal form from a schema file.
#[derive(Parser, Debug)]
#[command(name = "schemaform", version, about)]
struct Args {
    /// YAML or JSON schema file. Defaults to the built-in blog post form.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Where to write logs; the terminal itself belongs to the form.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// How several issues on one field are shown: first, last or aggregate.
    #[arg(long, default_value = "first")]
    error_policy: ErrorPolicy,

    /// Print the inferred field descriptors as JSON and exit.
    #[arg(long)]
    print_schema: bool,

    /// Heading shown above the form.
    #[arg(long)]
    title: Option<String>,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let (schema, default_title) = match &args.schema {
        Some(path) => (schema::loader::load(path)?, title_from_path(path)),
        None => (schema::presets::blog_post(), "New blog post".to_string()),
    };

    if args.print_schema {
        println!("{}", serde_json::to_string_pretty(&schema.describe())?);
        return Ok(());
    }

    let submissions = run_form(schema, &args, default_title)?;
    for data in submissions {
        println!("{}", data.to_json());
    }
    Ok(())
}

fn report(err: &dyn Error) -> String {
    format!("schemaform: {err}")
}

fn run_form(
    schema: Schema,
    args: &Args,
    default_title: String,
) -> Result<Vec<schema::ValidatedData>, Box<dyn Error>> {
    let app = FormApp::new(schema)
        .with_title(args.title.clone().unwrap_or(default_title))
        .with_error_policy(args.error_policy);

    let mut runtime = Runtime::new(app, Terminal::new()?);
    runtime.run()?;

    let app = runtime.into_app();
    tracing::info!(count = app.submissions().len(), "form closed");
    Ok(app.into_submissions())
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    tracing::info!("schemaform v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['-', '_'], " "))
        .map(|stem| schemaform::core::text::capitalize(&stem))
        .unwrap_or_else(|| "New entry".to_string())
}

#[cfg(test)]
mod tests {
    use super::{report, title_from_path};
    use std::path::Path;

    #[test]
    fn load_failures_are_reported_with_display_text() {
        let Err(err) = schemaform::schema::loader::load("/definitely/not/here.yaml") else {
            panic!("missing file should not load");
        };
        let message = report(&err);
        assert!(message.starts_with("schemaform: failed to read schema file"));
        assert!(!message.contains("Io {"));
    }

    #[test]
    fn title_comes_from_file_stem() {
        assert_eq!(title_from_path(Path::new("demos/blog-post.yaml")), "Blog post");
    }
}
