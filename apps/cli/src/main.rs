use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bundlepad_project::{
    FileRecord, ModuleResolver, ProjectStore, ProjectTemplate, TemplatePreset,
};
use bundlepad_settings::BundlerConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "bundlepad-cli",
    about = "Utility commands for Bundlepad playground projects",
    author,
    version
)]
struct Cli {
    /// 輸出除錯紀錄。 / Emit debug logging to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 顯示初始專案內容。 / Print the bootstrapping project.
    Defaults(DefaultsArgs),
    /// 驗證打包設定檔。 / Validate a bundler configuration file.
    CheckConfig(CheckConfigArgs),
    /// 在專案快照中解析匯入路徑。 / Resolve an import against a project snapshot.
    Resolve(ResolveArgs),
}

#[derive(Args)]
struct DefaultsArgs {
    /// 使用的樣板。 / Template preset to instantiate.
    #[arg(long, value_enum, default_value_t = PresetChoice::Typescript)]
    preset: PresetChoice,

    /// 以 JSON 輸出完整快照。 / Print the full snapshot as JSON instead of file names.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckConfigArgs {
    /// 要驗證的設定檔。 / Configuration file to validate.
    path: PathBuf,
}

#[derive(Args)]
struct ResolveArgs {
    /// 專案快照（`{name, content}` 陣列）。 / Project snapshot: a JSON array of `{name, content}`.
    #[arg(long, value_name = "PATH")]
    project: PathBuf,

    /// 發出匯入的檔案。 / File that contains the import.
    #[arg(long, value_name = "NAME")]
    from: String,

    /// 匯入路徑。 / Import specifier to resolve.
    specifier: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    #[value(alias = "ts")]
    Typescript,
    #[value(alias = "tsx")]
    React,
}

impl From<PresetChoice> for TemplatePreset {
    fn from(choice: PresetChoice) -> Self {
        match choice {
            PresetChoice::Typescript => TemplatePreset::TypeScript,
            PresetChoice::React => TemplatePreset::React,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { verbose, command } = Cli::parse();
    init_logging(verbose);
    match command {
        Commands::Defaults(args) => execute_defaults(args),
        Commands::CheckConfig(args) => execute_check_config(args),
        Commands::Resolve(args) => execute_resolve(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn execute_defaults(args: DefaultsArgs) -> Result<()> {
    let store = ProjectStore::with_template(ProjectTemplate::preset(args.preset.into()));
    if args.json {
        let payload = serde_json::to_string_pretty(&store.project().snapshot())
            .context("failed to serialize default project")?;
        println!("{payload}");
    } else {
        for name in store.list_files() {
            println!("{name}");
        }
    }
    Ok(())
}

fn execute_check_config(args: CheckConfigArgs) -> Result<()> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let config = BundlerConfig::parse(&text)
        .with_context(|| format!("{} is not a valid bundler configuration", args.path.display()))?;

    println!("{}: ok", args.path.display());
    print_option("format", config.format.map(|format| format.as_str()));
    print_option("minify", config.minify.map(|minify| minify.to_string()));
    print_option("cdnUrl", config.cdn_url.as_deref());
    print_option("jsx", config.jsx.map(|jsx| jsx.as_str()));
    print_option("jsxImportSource", config.jsx_import_source.as_deref());
    if !config.extra.is_empty() {
        println!("  preserved unknown keys: {}", config.extra.len());
    }
    Ok(())
}

fn print_option(key: &str, value: Option<impl std::fmt::Display>) {
    match value {
        Some(value) => println!("  {key}: {value}"),
        None => println!("  {key}: (bundler default)"),
    }
}

fn execute_resolve(args: ResolveArgs) -> Result<()> {
    if !args.project.exists() {
        bail!("project snapshot '{}' does not exist", args.project.display());
    }
    let text = fs::read_to_string(&args.project)
        .with_context(|| format!("failed to read {}", args.project.display()))?;
    let records: Vec<FileRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a project snapshot", args.project.display()))?;
    let store = ProjectStore::restore(records, ProjectTemplate::default())
        .with_context(|| format!("failed to restore {}", args.project.display()))?;
    log::debug!("restored {} files", store.list_files().len());

    let resolution = ModuleResolver::new(store.project()).resolve(&args.from, &args.specifier)?;
    println!("{resolution}");
    Ok(())
}
