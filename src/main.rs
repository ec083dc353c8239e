use clap::{Parser as ClapParser, Subcommand};
use jsonpath_eval::cli::{self, CliError, EvalOptions, EvalResult, OutputKind};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "jpe")]
#[command(about = "jpe - Evaluate JSONPath-like queries against JSON documents")]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a query against a JSON document
    Eval {
        /// The query to evaluate
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Coerce the result to a scalar type
        #[arg(long = "as", value_enum)]
        as_kind: Option<OutputKind>,
    },

    /// Show the normalized form of a query and whether it yields a vector
    Explain {
        /// The query to explain
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Eval {
            query,
            input,
            pretty,
            syntax_only,
            as_kind,
        } => run_eval(query, input, pretty, syntax_only, as_kind),
        Commands::Explain { query } => cli::explain(&query).map(|explanation| {
            println!("{}", explanation);
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_eval(
    query: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    as_kind: Option<OutputKind>,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = EvalOptions {
        query,
        input,
        pretty,
        syntax_only,
        as_kind,
    };

    match cli::execute_eval(&options)? {
        EvalResult::SyntaxValid => println!("Syntax is valid"),
        EvalResult::Success(output) => println!("{}", cli::render(&output, pretty)),
    }
    Ok(())
}
