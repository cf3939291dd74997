use clap::Parser;
use clap::ValueEnum;
use eval_jsx::builtins;
use eval_jsx::evaluate;
use eval_jsx::evaluate_jsx;
use eval_jsx::EvaluateOptions;
use eval_jsx::Input;
use parse_jsx::ast::Program;
use render_jsx::render_to_string;
use render_jsx::DenyAttributeFilter;
use render_jsx::RenderOptions;
use std::fs;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eval-jsx", about = "Evaluate JSX and ECMAScript in a sandbox")]
struct Cli {
  /// File to evaluate; omit for stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Evaluate a program and print its exports, or evaluate JSX and print its nodes.
  #[arg(short, long, value_enum, default_value_t = Mode::Jsx)]
  mode: Mode,

  #[arg(short, long, value_enum, default_value_t = Format::Json)]
  format: Format,

  /// JSON file with evaluation options (`binding`, `keyPrefix`, `disableCall`, ...).
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// The input is an ESTree JSON program instead of source text.
  #[arg(long)]
  ast: bool,

  /// Make the intrinsic globals (`Math`, `JSON`, `Array`, ...) visible to the script.
  #[arg(long)]
  builtins: bool,

  /// Only allow calls to these builtins, e.g. `String.prototype.toUpperCase`.
  #[arg(long, value_name = "PATH")]
  allow: Vec<String>,

  /// Deny calls to these builtins.
  #[arg(long, value_name = "PATH")]
  deny: Vec<String>,

  /// With `--format html`, drop elements that are not standard HTML.
  #[arg(long)]
  disable_unknown_html_element: bool,

  /// With `--format html`, strip props whose name matches this regex.
  #[arg(long, value_name = "REGEX")]
  deny_attribute: Vec<String>,

  /// Log spans and events to stderr, filtered by `RUST_LOG`.
  #[arg(long)]
  trace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
  Program,
  Jsx,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
  Json,
  Html,
}

fn init_tracing(enable: bool) {
  if !enable {
    return;
  }
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);
  if let Err(err) = builder.try_init() {
    eprintln!("failed to install tracing subscriber: {err}");
  }
}

fn read_input(path: Option<&PathBuf>) -> Result<String, String> {
  match path {
    Some(p) => fs::read_to_string(p).map_err(|err| format!("failed to read {}: {err}", p.display())),
    None => {
      let mut source = String::new();
      stdin()
        .read_to_string(&mut source)
        .map_err(|err| format!("failed to read input: {err}"))?;
      Ok(source)
    }
  }
}

fn resolve_builtins(paths: &[String]) -> Result<Vec<eval_jsx::Function>, String> {
  paths
    .iter()
    .map(|path| builtins::resolve_path(path).ok_or_else(|| format!("unknown builtin function {path}")))
    .collect()
}

fn options(args: &Cli) -> Result<EvaluateOptions, String> {
  let mut options = match &args.config {
    Some(path) => {
      let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
      serde_json::from_str::<EvaluateOptions>(&raw)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?
    }
    None => EvaluateOptions::default(),
  };
  if args.builtins {
    options = options.with_builtins();
  }
  options.allowed_functions.extend(resolve_builtins(&args.allow)?);
  options.denied_functions.extend(resolve_builtins(&args.deny)?);
  debug!(?options, "evaluation options");
  Ok(options)
}

fn render_options(args: &Cli) -> Result<RenderOptions, String> {
  let mut options = RenderOptions {
    disable_unknown_html_element: args.disable_unknown_html_element,
    ..RenderOptions::default()
  };
  if !args.deny_attribute.is_empty() {
    let filter = DenyAttributeFilter::new(&args.deny_attribute)
      .map_err(|err| format!("invalid --deny-attribute pattern: {err}"))?;
    options = options.element_filter(filter);
  }
  Ok(options)
}

fn run(args: &Cli) -> Result<String, String> {
  let source = read_input(args.input.as_ref())?;
  let program = if args.ast {
    Some(serde_json::from_str::<Program>(&source).map_err(|err| format!("invalid ESTree JSON: {err}"))?)
  } else {
    None
  };
  let input = match &program {
    Some(program) => Input::Program(program),
    None => Input::Source(&source),
  };
  let options = options(args)?;

  match (args.mode, args.format) {
    (Mode::Program, Format::Json) => {
      let ctx = evaluate(input, options).map_err(|err| err.to_string())?;
      let exports: serde_json::Map<String, serde_json::Value> = ctx
        .exports()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_json()))
        .collect();
      serde_json::to_string_pretty(&exports).map_err(|err| err.to_string())
    }
    (Mode::Program, Format::Html) => Err("--format html needs --mode jsx".into()),
    (Mode::Jsx, Format::Json) => {
      let nodes = evaluate_jsx(input, options).map_err(|err| err.to_string())?;
      serde_json::to_string_pretty(&nodes).map_err(|err| err.to_string())
    }
    (Mode::Jsx, Format::Html) => {
      let render = render_options(args)?;
      let nodes = evaluate_jsx(input, options).map_err(|err| err.to_string())?;
      Ok(render_to_string(&nodes, &render))
    }
  }
}

fn main() -> ExitCode {
  let args = Cli::parse();
  init_tracing(args.trace);
  let output = match run(&args) {
    Ok(output) => output,
    Err(message) => {
      eprintln!("{message}");
      return ExitCode::FAILURE;
    }
  };
  let written = match &args.output {
    Some(path) => fs::write(path, output.as_bytes()),
    None => stdout().write_all(output.as_bytes()).and_then(|()| stdout().write_all(b"\n")),
  };
  if let Err(err) = written {
    eprintln!("failed to write output: {err}");
    return ExitCode::FAILURE;
  }
  ExitCode::SUCCESS
}
