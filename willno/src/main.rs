use std::env;
use std::sync::Arc;
use willno::config::RuntimeConfig;
use willno::file_processor::FileProcessor;
use willno::lexical::{self, Tokenizer};
use willno::logging::{self, codes, LoggingService};
use willno::profile::{self, LanguageProfile, ProfileBuilder, ProfileError};
use willno::symbols::format_store;
use willno::utils::SourceMap;

const BUILTIN_LITERALS: [&str; 3] = ["string", "number", "boolean"];

/// Parsed command line for one scan
#[derive(Debug, Default, PartialEq)]
struct ScanOptions {
    input: String,
    profile_path: Option<String>,
    keywords: Vec<String>,
    /// (role, spelling)
    roles: Vec<(String, String)>,
    comments: Vec<String>,
    literals: Vec<String>,
    json: bool,
    log_file: Option<String>,
    quiet: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Scan(ScanOptions),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("willno");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Help) => {
            print_help(program);
            return Ok(());
        }
        Ok(Command::Scan(options)) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <file> [options]", program);
            eprintln!("       {} --help", program);
            std::process::exit(1);
        }
    };

    if let Err(error) = init_logging(options.log_file.as_deref())
        .and_then(|()| lexical::validate_scan_configuration().map_err(Into::into))
    {
        logging::safe_log_critical(codes::system::INITIALIZATION_FAILURE, &error.to_string());
        std::process::exit(1);
    }

    let config = RuntimeConfig::default();

    let file_result = match FileProcessor::from_preferences(&config.file_processor)
        .process_file(&options.input)
    {
        Ok(result) => result,
        Err(error) => {
            eprintln!("FAILED: {}", error);
            std::process::exit(1);
        }
    };

    let profile = match build_profile(&options, &file_result.metadata.identifier()) {
        Ok(profile) => profile,
        Err(error) => {
            eprintln!("FAILED: {}", error);
            std::process::exit(1);
        }
    };

    let quiet = options.quiet;
    let mut tokenizer = Tokenizer::with_preferences(config.scan)
        .on_keyword_match(move |token| {
            if !quiet {
                println!("Matched keyword: {}", token.name);
            }
        })
        .on_complete(move |tokens| {
            if !quiet {
                print_completion_summary(tokens);
            }
        });

    match tokenizer.scan_file_result(&file_result, &profile) {
        Ok(store) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&store)?);
            } else {
                print!("{}", format_store(&store));
            }
        }
        Err(error) => {
            let source_map = SourceMap::new(file_result.source.clone());
            eprintln!("FAILED: {}", file_result.metadata.path.display());
            eprint!("{}", source_map.format_error(&error.span(), &error.to_string()));
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Console logging per environment, plus an optional file target
fn init_logging(log_file: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let min_level = logging::config::get_min_log_level();
    let mut multi_logger = logging::service::create_configured_multi_logger();

    if let Some(path) = log_file {
        multi_logger =
            multi_logger.with_file(path, min_level, logging::config::use_structured_logging())?;
    }

    let service = LoggingService::new(Arc::new(multi_logger), min_level);
    logging::init_global_logging_with_service(Arc::new(service))?;
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = ScanOptions::default();
    let mut input: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--profile" => options.profile_path = Some(value_for("--profile")?),
            "--keyword" => options.keywords.push(value_for("--keyword")?),
            "--role" => options.roles.push(parse_role(&value_for("--role")?)?),
            "--comment" => options.comments.push(value_for("--comment")?),
            "--literal" => options.literals.push(value_for("--literal")?),
            "--log-file" => options.log_file = Some(value_for("--log-file")?),
            "--json" => options.json = true,
            "--quiet" => options.quiet = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path => {
                if let Some(first) = &input {
                    return Err(format!("Unexpected argument '{}' after '{}'", path, first));
                }
                input = Some(path.to_string());
            }
        }
    }

    options.input = input.ok_or("Missing input file")?;
    Ok(Command::Scan(options))
}

/// `ROLE=SPELLING`, e.g. `variable=let`
fn parse_role(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((role, spelling)) if !role.trim().is_empty() && !spelling.trim().is_empty() => {
            Ok((role.trim().to_string(), spelling.trim().to_string()))
        }
        _ => Err(format!("--role expects ROLE=SPELLING, got '{}'", value)),
    }
}

/// Profile from the definition file (if any) with the command-line additions on top.
/// Without a definition file or any `--literal`, the built-in literal categories are enabled.
fn build_profile(
    options: &ScanOptions,
    identifier: &str,
) -> Result<LanguageProfile, ProfileError> {
    let mut builder = match &options.profile_path {
        Some(path) => profile::load_builder_for(path, identifier)?,
        None => ProfileBuilder::new(identifier),
    };

    for keyword in &options.keywords {
        builder = builder.add_keyword(keyword);
    }
    for (role, spelling) in &options.roles {
        builder = builder.add_keyword_role(role, spelling);
    }
    for marker in &options.comments {
        builder = builder.add_comment(marker);
    }

    let literals: Vec<&str> = if options.profile_path.is_none() && options.literals.is_empty() {
        BUILTIN_LITERALS.to_vec()
    } else {
        options.literals.iter().map(String::as_str).collect()
    };
    for tag in literals {
        builder = builder.add_literal_category(tag);
    }

    builder.build()
}

fn print_completion_summary(tokens: &[willno::Token]) {
    let counts = lexical::get_token_counts(tokens);
    println!(
        "Scan complete: {} tokens ({} keywords, {} literals, {} identifiers, {} comments, {} unknown)",
        counts.total,
        counts.keywords,
        counts.literals,
        counts.identifiers,
        counts.comments,
        counts.unknown
    );
}

fn print_help(program_name: &str) {
    println!("willno v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile-driven tokenizer");
    println!();
    println!("USAGE:");
    println!("    {} <file> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <file>    File to scan; its name is the profile identifier");
    println!();
    println!("OPTIONS:");
    println!("    --help                    Show this help message");
    println!("    --profile <def.toml>      Load keywords, comments, literals and roles");
    println!("    --keyword <K>             Add a keyword (repeatable)");
    println!("    --role <ROLE=SPELLING>    Add a keyword bound to a role (repeatable)");
    println!("    --comment <MARKER>        Add a comment marker (repeatable)");
    println!("    --literal <TAG>           Enable a literal category (repeatable)");
    println!("    --json                    Print the token store as JSON");
    println!("    --log-file <PATH>         Also write log events to PATH");
    println!("    --quiet                   Suppress per-keyword and summary output");
    println!();
    println!("Without --profile or --literal, string, number and boolean literals are enabled.");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} app.my --role variable=let --comment //     # Store `let x = 1` as variable x",
        program_name
    );
    println!(
        "    {} app.my --profile profiles/mylang.toml --json",
        program_name
    );
}
