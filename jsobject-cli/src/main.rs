use clap::Args;
use clap::Parser;
use clap::Subcommand;
use error::CliError;
use jsobject::classify::Diagnostic;
use jsobject::render::render_diagnostic;
use jsobject::CompileOptions;
use jsobject::EditSeq;
use jsobject::PolicyKind;
use jsobject::Session;
use jsobject::SessionView;
use jsobject::Severity;
use parse_jsobject::SourceShape;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::stdin;
use std::io::IsTerminal;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use widget_validation::validate;
use widget_validation::ValidationContext;
use widget_validation::ValidationRule;
use widget_validation::Value;

mod error;

#[derive(Parser)]
#[command(author, version, about = "Check JS Objects and widget property values")]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Emit tracing spans (JSON) on stderr.
  #[arg(long, global = true)]
  trace: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile a JS Object and print what the editor would show.
  Check(CheckArgs),
  /// Ask whether a function of a JS Object may run.
  Run(RunArgs),
  /// Validate a widget property value.
  Validate(ValidateArgs),
}

#[derive(Args)]
struct CompileArgs {
  /// JSON file with compile options.
  #[arg(long)]
  config: Option<PathBuf>,

  /// A name the host provides at run time, like a widget or query. Repeatable.
  #[arg(long = "global", value_name = "NAME")]
  globals: Vec<String>,

  /// How body issues are graded: default, strict or permissive.
  #[arg(long)]
  policy: Option<PolicyKind>,

  /// Accept a bare `{ ... }` literal without `export default`.
  #[arg(long)]
  bare_object: bool,
}

#[derive(Args)]
struct CheckArgs {
  /// Source file. Reads stdin if omitted.
  file: Option<PathBuf>,

  #[command(flatten)]
  compile: CompileArgs,
}

#[derive(Args)]
struct RunArgs {
  /// The function to run.
  name: String,

  /// Source file. Reads stdin if omitted.
  file: Option<PathBuf>,

  #[command(flatten)]
  compile: CompileArgs,
}

#[derive(Args)]
struct ValidateArgs {
  /// The value as JSON. Omit for `undefined`.
  #[arg(long)]
  value: Option<String>,

  /// The widget props as JSON, e.g. `{"listData": [...]}`.
  #[arg(long, default_value = "{}")]
  context: String,

  /// The rule as JSON. Defaults to the primary key rule.
  #[arg(long)]
  rule: Option<String>,

  /// Treat the rule's property as bound with JS.
  #[arg(long)]
  dynamic: bool,
}

#[derive(Serialize)]
struct CheckOutput {
  view: SessionView,
  diagnostics: Vec<Diagnostic>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.trace);
  let result = match cli.command {
    Commands::Check(args) => run_check(args),
    Commands::Run(args) => run_run(args),
    Commands::Validate(args) => run_validate(args),
  };
  match result {
    Ok(code) => code,
    Err(err) => {
      eprintln!("error: {}", err);
      ExitCode::from(CliError::EXIT_CODE)
    }
  }
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .json()
    .with_ansi(false)
    .try_init();
}

fn read_source(file: Option<&PathBuf>) -> Result<String, CliError> {
  match file {
    Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
      path: Some(path.clone()),
      source,
    }),
    None => {
      let mut source = String::new();
      stdin()
        .read_to_string(&mut source)
        .map_err(|source| CliError::Read { path: None, source })?;
      Ok(source)
    }
  }
}

fn source_name(file: Option<&PathBuf>) -> String {
  file
    .map(|p| p.display().to_string())
    .unwrap_or_else(|| "<stdin>".to_string())
}

fn compile_options(args: &CompileArgs) -> Result<CompileOptions, CliError> {
  let mut options = match &args.config {
    Some(path) => {
      let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: Some(path.clone()),
        source,
      })?;
      serde_json::from_str(&raw).map_err(|source| CliError::Config {
        path: path.clone(),
        source,
      })?
    }
    None => CompileOptions::default(),
  };
  options.globals.extend(args.globals.iter().cloned());
  if let Some(policy) = args.policy {
    options.policy = policy;
  };
  if args.bare_object {
    options.parse.source_shape = SourceShape::BareObject;
  };
  Ok(options)
}

fn compiled_session(
  file: Option<&PathBuf>,
  args: &CompileArgs,
) -> Result<(Session, String), CliError> {
  let options = compile_options(args)?;
  let source = read_source(file)?;
  let mut session = Session::new(options);
  session.edit(EditSeq(1), &source);
  Ok((session, source))
}

fn print_json<T: Serialize>(value: &T) {
  match serde_json::to_string_pretty(value) {
    Ok(serialized) => println!("{}", serialized),
    Err(err) => eprintln!("failed to serialize JSON: {}", err),
  }
}

fn run_check(args: CheckArgs) -> Result<ExitCode, CliError> {
  let (session, source) = compiled_session(args.file.as_ref(), &args.compile)?;
  let diagnostics = session
    .current()
    .map(|c| c.classification.diagnostics.clone())
    .unwrap_or_default();
  let name = source_name(args.file.as_ref());
  let color = std::io::stderr().is_terminal();
  for diagnostic in diagnostics.iter() {
    eprint!("{}", render_diagnostic(&name, &source, diagnostic, color));
  }
  let view = session.view();
  let state = view.state;
  print_json(&CheckOutput { view, diagnostics });
  Ok(match state {
    Severity::ObjectInvalid => ExitCode::FAILURE,
    _ => ExitCode::SUCCESS,
  })
}

fn run_run(args: RunArgs) -> Result<ExitCode, CliError> {
  let (mut session, _) = compiled_session(args.file.as_ref(), &args.compile)?;
  let gate = session.run(&args.name);
  print_json(&gate);
  Ok(match gate.is_permitted() {
    true => ExitCode::SUCCESS,
    false => ExitCode::FAILURE,
  })
}

fn parse_json<T: DeserializeOwned>(
  flag: &'static str,
  raw: &str,
) -> Result<T, CliError> {
  serde_json::from_str(raw).map_err(|source| CliError::Json { flag, source })
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode, CliError> {
  let value = match &args.value {
    Some(raw) => parse_json::<Value>("value", raw)?,
    None => Value::Undefined,
  };
  let rule = match &args.rule {
    Some(raw) => parse_json::<ValidationRule>("rule", raw)?,
    None => ValidationRule::default(),
  };
  let mut ctx = parse_json::<ValidationContext>("context", &args.context)?;
  if args.dynamic {
    let path = match &rule {
      ValidationRule::PrimaryKey(rule) => rule.property_path.clone(),
      _ => widget_validation::rule::PRIMARY_KEYS_PATH.to_string(),
    };
    ctx = ctx.with_dynamic_path(path);
  };
  let result = validate(&rule, &value, &ctx);
  print_json(&result);
  Ok(match result.is_valid {
    true => ExitCode::SUCCESS,
    false => ExitCode::FAILURE,
  })
}
