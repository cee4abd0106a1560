//! prodstring CLI: validate Adobe Analytics `s.products` strings.
//!
//! Examples:
//!   prodstring 'Cat;Name;1;3.50'            - validate one product string
//!   prodstring - < products.txt             - validate each line of stdin
//!   prodstring products.txt --file          - validate each line of a file
//!   prodstring 'Cat;Name;1;3,50' --json     - print the parse result as JSON

use std::io::{self, IsTerminal, Read};

use facet::Facet;
use figue as args;
use prodstring_parse::ProductString;
use prodstring_report::{render_all, to_json};
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_VALID: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_CASCADING: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;
const EXIT_USAGE_ERROR: i32 = 4;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line arguments: `prodstring <input> [options]`
#[derive(Facet, Debug, Default)]
struct Args {
    /// Product string, "-" for stdin, or a path with --file
    #[facet(args::positional)]
    input: String,

    /// Read product strings from the file named by <input>, one per line
    #[facet(args::named, default)]
    file: bool,

    /// Print each result as a JSON document
    #[facet(args::named, default)]
    json: bool,

    /// Print nothing; report through the exit code only
    #[facet(args::named, args::short = 'q', default)]
    quiet: bool,

    /// Name shown in diagnostic reports
    #[facet(args::named, default)]
    filename: Option<String>,
}

fn main() {
    init_tracing();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    if raw_args.is_empty() || raw_args[0] == "--help" || raw_args[0] == "-h" {
        print_help();
        std::process::exit(EXIT_VALID);
    }

    if raw_args[0] == "--version" || raw_args[0] == "-V" {
        println!("prodstring {VERSION}");
        std::process::exit(EXIT_VALID);
    }

    match run(&raw_args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` directives, falling back to `warn` when unset or empty.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn print_help() {
    eprintln!("prodstring {VERSION} - validate Adobe Analytics s.products strings\n");
    eprintln!("USAGE:");
    eprintln!("    prodstring <input> [options]\n");
    eprintln!("    <input> is a product string, or '-' to read one string per line from stdin.\n");
    eprintln!("OPTIONS:");
    eprintln!("        --file                      Treat <input> as a file with one string per line");
    eprintln!("        --json                      Print each result as JSON");
    eprintln!("    -q, --quiet                     Print nothing, only set the exit code");
    eprintln!("        --filename <NAME>           Name shown in diagnostic reports");
    eprintln!("    -V, --version                   Show version\n");
    eprintln!("EXIT CODES:");
    eprintln!("    0  every product is valid");
    eprintln!("    1  some product is invalid");
    eprintln!("    2  a decimal comma in a price split the string");
    eprintln!("    3  input could not be read");
    eprintln!("    4  invalid arguments\n");
    eprintln!("EXAMPLES:");
    eprintln!("    prodstring 'Shoes;Runner;1;59.99;event1=4.99;eVar1=Summer'");
    eprintln!("    prodstring products.txt --file --json");
}

fn run(raw_args: &[String]) -> Result<i32, CliError> {
    let args_strs: Vec<&str> = raw_args.iter().map(|s| s.as_str()).collect();
    let opts: Args =
        figue::from_slice(&args_strs).map_err(|e| CliError::Usage(format!("{e:?}")))?;

    if opts.file && opts.input == "-" {
        return Err(CliError::Usage("--file cannot be used with stdin".into()));
    }
    if opts.json && opts.quiet {
        return Err(CliError::Usage(
            "--json and --quiet cannot be combined".into(),
        ));
    }

    let inputs = read_inputs(&opts)?;
    let filename = opts.filename.clone().unwrap_or_else(|| {
        if opts.input == "-" {
            "<stdin>".to_string()
        } else if opts.file {
            opts.input.clone()
        } else {
            "<input>".to_string()
        }
    });
    let color = io::stderr().is_terminal();

    let mut exit_code = EXIT_VALID;
    for source in &inputs {
        let parsed = ProductString::parse(source);
        debug!(
            "Parsed {} product(s), valid: {}, cascading: {}",
            parsed.len(),
            parsed.is_valid(),
            parsed.has_cascading_error()
        );
        exit_code = exit_code.max(outcome_code(&parsed));

        if opts.quiet {
            continue;
        }
        if opts.json {
            let output = serde_json::to_string(&to_json(&parsed))
                .map_err(|e| CliError::Io(io::Error::other(e)))?;
            println!("{output}");
        } else {
            eprint!("{}", render_all(parsed.diagnostics(), &filename, source, color));
            println!("{}", summary(&parsed));
        }
    }

    Ok(exit_code)
}

fn read_inputs(opts: &Args) -> Result<Vec<String>, CliError> {
    if opts.input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(split_lines(&buf))
    } else if opts.file {
        let content = std::fs::read_to_string(&opts.input)
            .map_err(|e| CliError::Io(io::Error::new(e.kind(), format!("{}: {e}", opts.input))))?;
        Ok(split_lines(&content))
    } else {
        Ok(vec![opts.input.clone()])
    }
}

/// One product string per non-blank line.
fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn outcome_code(parsed: &ProductString) -> i32 {
    if parsed.has_cascading_error() {
        EXIT_CASCADING
    } else if !parsed.is_valid() {
        EXIT_INVALID
    } else {
        EXIT_VALID
    }
}

fn summary(parsed: &ProductString) -> String {
    let total = parsed.len();
    if total == 0 {
        return "valid: no products".to_string();
    }
    if parsed.has_cascading_error() {
        return format!(
            "invalid: {total} product(s), a decimal comma in a price split the string (use '.' for decimals)"
        );
    }
    let invalid = parsed.iter().filter(|p| !p.is_valid).count();
    if invalid == 0 {
        format!("valid: {total} product(s)")
    } else {
        format!("invalid: {invalid} of {total} product(s)")
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Usage(_) => EXIT_USAGE_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
