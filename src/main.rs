//! Credit Risk Core - command line entry point

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use credit_risk_core::constants::{APP_NAME, APP_VERSION};
use credit_risk_core::logic::explain::ExplanationSection;
use credit_risk_core::logic::presets::Preset;
use credit_risk_core::{Assessment, Explanation, RawInputs, RiskConfig, RiskError, RiskPipeline};

#[derive(Parser)]
#[command(name = "credit-risk", version, about = "Score and explain credit default risk")]
struct Cli {
    /// Model bundle directory (overrides RISK_MODEL_DIR; default is the built-in bundle)
    #[arg(long, value_name = "DIR", global = true)]
    model_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a JSON object of form inputs (feature names or UI labels as keys)
    Score {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Score a built-in applicant profile
    Demo {
        #[arg(long, value_enum, default_value_t = PresetCli::High)]
        preset: PresetCli,
    },
    /// Print the loaded feature layout
    Schema,
}

#[derive(Clone, ValueEnum)]
enum PresetCli {
    Low,
    High,
}

impl From<PresetCli> for Preset {
    fn from(value: PresetCli) -> Self {
        match value {
            PresetCli::Low => Preset::LowRisk,
            PresetCli::High => Preset::HighRisk,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let mut config = RiskConfig::from_env();
    if let Some(dir) = cli.model_dir.clone() {
        config.model_dir = Some(dir);
    }

    let pipeline = match RiskPipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => fail(&e),
    };

    match cli.command {
        Command::Schema => print_schema(&pipeline, cli.json),
        Command::Score { input } => {
            let raw = match read_inputs(&input) {
                Ok(raw) => raw,
                Err(msg) => {
                    eprintln!("Error: {}", msg);
                    process::exit(2);
                }
            };
            run(&pipeline, &raw, cli.json);
        }
        Command::Demo { preset } => run(&pipeline, &Preset::from(preset).inputs(), cli.json),
    }
}

fn read_inputs(path: &Path) -> Result<RawInputs, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid input JSON in {}: {}", path.display(), e))
}

fn run(pipeline: &RiskPipeline, raw: &RawInputs, json: bool) {
    let assessment = match pipeline.assess(raw) {
        Ok(a) => a,
        Err(e) => fail(&e),
    };

    if json {
        match serde_json::to_string_pretty(&assessment) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_assessment(&assessment);
    }
}

fn print_assessment(assessment: &Assessment) {
    let score = &assessment.score;
    println!("{} ({})", score.verdict.label(), score.verdict);
    println!(
        "Probabilitas gagal bayar: {:.1}% (ambang {:.0}%)",
        score.probability * 100.0,
        score.threshold * 100.0
    );

    match &assessment.explanation {
        Explanation::Ready(set) => {
            print_section("Faktor yang meningkatkan risiko", &set.risers);
            print_section("Faktor yang menurunkan risiko", &set.fallers);
        }
        Explanation::Unavailable { reason } => println!("\nPenjelasan tidak tersedia: {}", reason),
        Explanation::Skipped { reason } => println!("\nPenjelasan dilewati: {}", reason),
    }
}

fn print_section(title: &str, section: &ExplanationSection) {
    println!("\n{}:", title);
    for line in &section.lines {
        println!("  - {}", line);
    }
}

fn print_schema(pipeline: &RiskPipeline, json: bool) {
    let bundle = pipeline.bundle();

    if json {
        let out = serde_json::json!({
            "bundle": bundle.metadata(),
            "schema": bundle.schema(),
            "enumerations": bundle.tables(),
        });
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        return;
    }

    let meta = bundle.metadata();
    println!("{} v{} ({})", meta.name, meta.version, meta.source);
    println!(
        "layout v{} hash {:08x}, backend={}, attributor={}",
        meta.layout.version,
        meta.layout.hash,
        meta.classifier,
        meta.attributor.as_deref().unwrap_or("none")
    );
    for (i, spec) in bundle.schema().features().iter().enumerate() {
        let table = spec.table.as_deref().map(|t| format!(" [{}]", t)).unwrap_or_default();
        println!("{:>3}  {:<10} {:<28} {:?}{}", i, spec.name, spec.label, spec.kind, table);
    }

    let tables = bundle.tables();
    println!("\nenumerations {}", tables.version);
    for name in tables.table_names() {
        let Some(table) = tables.table(name) else { continue };
        let entries: Vec<String> = table
            .entries()
            .iter()
            .map(|e| format!("{}={}", e.code, e.label))
            .collect();
        println!("  {:<20} {}", name, entries.join(", "));
    }
}

fn fail(e: &RiskError) -> ! {
    eprintln!("Error: {}", e.user_message());
    process::exit(if e.is_user_correctable() { 2 } else { 1 });
}
