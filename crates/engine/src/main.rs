//! Brancalonia sheet builder - command line entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brancalonia_domain::{ItemCost, ReferenceData};
use brancalonia_engine::config::{load_dotenv, AppConfig};
use brancalonia_engine::infrastructure::build_file::CharacterBuild;
use brancalonia_engine::infrastructure::pdf_form::{PdfFormTemplate, PdfSheetExporter};
use brancalonia_engine::infrastructure::ports::SheetExporter;
use brancalonia_engine::infrastructure::reference_loader::JsonReferenceLoader;
use brancalonia_engine::CharacterSheetSession;

#[derive(Debug, Parser)]
#[command(name = "brancalonia", version, about = "Brancalonia character sheet builder")]
struct Cli {
    /// Directory with racas.json, pericias.json, vantagens.json and equipamento.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fillable sheet template
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List races, skills, advantages, complications and equipment
    Options,
    /// Show the budget panel for a build
    Summary {
        /// Build file (JSON); a fresh character when omitted
        #[arg(long)]
        build: Option<PathBuf>,
        /// Print state and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill the sheet template for a build
    Export {
        #[arg(long)]
        build: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Character name; overrides the build file
        #[arg(long)]
        name: Option<String>,
    },
    /// List the form fields of the sheet template
    Fields {
        /// Print the field list as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brancalonia_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?.with_overrides(cli.data_dir, cli.template);
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Command::Options => {
            let data = JsonReferenceLoader::new(&config.data_dir).load_all();
            print_options(&data);
        }
        Command::Summary { build, json } => {
            let build = build
                .map(|path| CharacterBuild::from_path(&path))
                .transpose()?
                .unwrap_or_default();
            let session = open_session(&config, &build, None);
            if json {
                let out = serde_json::json!({
                    "state": session.state(),
                    "report": session.report(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_summary(&session);
            }
        }
        Command::Export { build, out, name } => {
            let exporter: Arc<dyn SheetExporter> =
                Arc::new(PdfSheetExporter::new(config.template_path()));
            let build = CharacterBuild::from_path(&build)?;
            let session = open_session(&config, &build, Some(exporter));

            let name = name
                .or(build.name)
                .unwrap_or_else(|| config.character_name.clone());
            let bytes = session.export(&name)?;

            let out = out.unwrap_or_else(|| config.output.clone());
            std::fs::write(&out, bytes)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Sheet written to {}", out.display());
        }
        Command::Fields { json } => {
            let template = PdfFormTemplate::open(&config.template_path())?;
            let fields = template.fields()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
            } else {
                for field in fields {
                    println!("{}\t{}", field.name, field.kind.label());
                }
            }
        }
    }

    Ok(())
}

fn open_session(
    config: &AppConfig,
    build: &CharacterBuild,
    exporter: Option<Arc<dyn SheetExporter>>,
) -> CharacterSheetSession {
    let data = Arc::new(JsonReferenceLoader::new(&config.data_dir).load_all());
    CharacterSheetSession::from_build(data, exporter, build)
}

fn print_options(data: &ReferenceData) {
    println!("Raças:");
    for (name, race) in data.races() {
        println!("  {}", name);
        if !race.description.is_empty() {
            println!("    {}", race.description);
        }
        if !race.bonuses.is_empty() {
            let bonuses: Vec<String> = race
                .bonuses
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            println!("    Bônus: {}", bonuses.join(", "));
        }
    }

    println!("Perícias (* = básica):");
    for skill in data.skills() {
        println!(
            "  {} ({}){}",
            skill.name,
            skill.linked_attribute().abbreviation(),
            if skill.core { " *" } else { "" }
        );
    }

    println!("Vantagens:");
    for advantage in data.advantages() {
        println!("  {}", advantage.name);
    }

    println!("Complicações:");
    for complication in data.complications() {
        println!("  {} ({})", complication.name, complication.kind);
    }

    println!("Equipamento:");
    for (category, items) in data.equipment() {
        println!("  {}", category);
        for item in items {
            let cost = match &item.cost {
                ItemCost::Coins(coins) => format!("${}", coins),
                ItemCost::Fractional(value) => format!("${}", value),
                ItemCost::Label(label) => label.clone(),
            };
            println!("    {} - {}", item.name, cost);
        }
    }
}

fn print_summary(session: &CharacterSheetSession) {
    let state = session.state();
    let report = session.report();

    println!("Raça: {}", state.race());
    println!("Attr Base: {}/5", report.attr_base);
    println!("Saldo Criação: {}", report.balance);
    println!(
        "Pts Perícia: {}/{}",
        report.skill_points_remaining(),
        report.skill_points
    );
    println!("Dinheiro: ${}", report.money_remaining());
    if report.is_over_budget() {
        println!("(acima do orçamento)");
    }

    println!("Atributos:");
    for (attribute, die) in state.attributes() {
        println!("  {} {}", attribute, die);
    }

    println!("Perícias:");
    for (skill, die) in state.active_skills() {
        println!("  {} {}", skill, die);
    }

    let advantages: Vec<&str> = state.advantages().collect();
    if !advantages.is_empty() {
        println!("Vantagens: {}", advantages.join(", "));
    }
    let complications: Vec<&str> = state.complications().collect();
    if !complications.is_empty() {
        println!("Complicações: {}", complications.join(", "));
    }

    let equipment = state.equipment_lines();
    if !equipment.is_empty() {
        println!("Equipamento:");
        for line in equipment {
            println!("  {}", line);
        }
    }
}
