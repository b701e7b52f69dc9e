use clap::{Parser as ClapParser, Subcommand};
use jsonwhere::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "jsonwhere")]
#[command(about = "Compile MongoDB-style JSON query documents into SQL WHERE clauses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON query document and print the SQL predicate
    Check {
        /// The JSON query document (reads from stdin if not provided)
        query: Option<String>,

        /// Comma-separated whitelist of permitted field names
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate the document, don't print the predicate
        #[arg(long)]
        syntax_only: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            fields,
            pretty,
            syntax_only,
        } => run_check(query, fields, pretty, syntax_only),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: Option<String>,
    fields: Vec<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        fields,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid => println!("Query is valid"),
        CheckResult::Compiled(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
            .unwrap();
            println!("{}", json);
        }
    }
    Ok(())
}
