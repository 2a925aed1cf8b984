use clap::{Parser as ClapParser, Subcommand};
use doc_expr::{
    Config,
    cli::{self, CheckOptions, CheckResult, CliError, Mode},
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "doc-expr")]
#[command(about = "doc-expr - Parse filter expressions and render them in a backend dialect")]
#[command(version)]
struct Cli {
    /// JSON configuration file (log level, dialect)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an expression and print it rendered
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Only validate syntax, don't render
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the field names an expression references
    Fields {
        expression: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the conjunctions, assignments and comparisons of an expression
    Extract {
        expression: Option<String>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the parsed tree
    Tree {
        expression: Option<String>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Compile a JSON array of keyword and literal terms without parsing
    Build {
        /// e.g. '["id", "=", 10, "AND", "step", "=", 1]'
        terms: String,
    },

    /// Show the syntax reference
    Docs,
}

fn main() {
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        init_tracing(&config);
        run(cli.command, config)
    });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Result<Config, CliError> {
    let config = match path {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    Ok(config.with_env())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands, config: Config) -> Result<(), CliError> {
    match command {
        Commands::Check {
            expression,
            syntax_only,
        } => run_check(expression, Mode::Render, false, syntax_only, config),
        Commands::Fields { expression, pretty } => {
            run_check(expression, Mode::Fields, pretty, false, config)
        }
        Commands::Extract { expression, pretty } => {
            run_check(expression, Mode::Extract, pretty, false, config)
        }
        Commands::Tree { expression, pretty } => {
            run_check(expression, Mode::Tree, pretty, false, config)
        }
        Commands::Build { terms } => {
            println!("{}", cli::execute_build(&terms, config.dialect.as_ref())?);
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
    }
}

fn run_check(
    expression: Option<String>,
    mode: Mode,
    pretty: bool,
    syntax_only: bool,
    config: Config,
) -> Result<(), CliError> {
    let expression = match expression {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        expression,
        mode,
        syntax_only,
        dialect: config.dialect,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Rendered(text) => println!("{}", text),
        CheckResult::Output(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
