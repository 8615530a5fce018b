use clap::{Parser, Subcommand};
use kaifuku::prelude::*;
use kaifuku::validator::Severity;
use std::fs;
use std::path::PathBuf;

/// Generate and validate n8n self-healing orchestration workflows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the self-healing orchestrator workflow document
    Generate {
        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the workflow display name
        #[arg(long)]
        name: Option<String>,

        /// Override the remediation service base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override the incident webhook path
        #[arg(long)]
        webhook_path: Option<String>,

        /// Override the header-auth credential id
        #[arg(long)]
        credential_id: Option<String>,

        /// Run the validator over the generated document first
        #[arg(long)]
        validate: bool,
    },
    /// Validate a workflow JSON file and print the report
    Validate {
        /// Path to the workflow JSON file
        file: PathBuf,
    },
    /// Print a plain-text graph of a workflow JSON file
    Graph {
        /// Path to the workflow JSON file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            output,
            name,
            base_url,
            webhook_path,
            credential_id,
            validate: run_validation,
        } => {
            let mut options = OrchestratorOptions::default();
            if let Some(name) = name {
                options.name = name;
            }
            if let Some(base_url) = base_url {
                options.base_url = base_url;
            }
            if let Some(webhook_path) = webhook_path {
                options.webhook_path = webhook_path;
            }
            if let Some(credential_id) = credential_id {
                options.credential_id = credential_id;
            }

            let document = self_healing_workflow(&options)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to build workflow: {}", e)));

            if run_validation {
                let value = document.to_value().unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to encode workflow: {}", e))
                });
                let report = validate(&value);
                print_report(&report);
                if !report.is_valid() {
                    std::process::exit(1);
                }
            }

            match output {
                Some(path) => {
                    document.write_to_file(&path).unwrap_or_else(|e| {
                        exit_with_error(&format!(
                            "Failed to write '{}': {}",
                            path.display(),
                            e
                        ))
                    });
                    eprintln!("Wrote workflow to {}", path.display());
                }
                None => {
                    let json = document.to_json_pretty().unwrap_or_else(|e| {
                        exit_with_error(&format!("Failed to serialize workflow: {}", e))
                    });
                    println!("{}", json);
                }
            }
        }
        Command::Validate { file } => {
            let workflow = load_workflow(&file);
            let report = validate(&workflow);
            print_report(&report);
            if !report.is_valid() {
                std::process::exit(1);
            }
        }
        Command::Graph { file } => {
            let workflow = load_workflow(&file);
            println!("{}", render_graph(&workflow));
        }
    }
}

fn load_workflow(path: &PathBuf) -> serde_json::Value {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse '{}': {}", path.display(), e))
    })
}

fn print_report(report: &ValidationReport) {
    println!("Workflow: {}", report.workflow_name);
    println!(
        "Nodes: {}  Connections: {}  Webhooks: {}",
        report.stats.total_nodes, report.stats.total_connections, report.stats.total_webhooks
    );

    for issue in &report.issues {
        let label = match issue.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("  {}: {}", label, issue);
    }

    println!(
        "Result: {} (score {}/100, {} errors, {} warnings)",
        if report.is_valid() { "VALID" } else { "INVALID" },
        report.score(),
        report.errors().count(),
        report.warnings().count()
    );
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
