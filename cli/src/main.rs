//! docugraph CLI - inspect OCR analysis responses as structured documents

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use docugraph::Document;

#[derive(Parser)]
#[command(name = "docugraph")]
#[command(version)]
#[command(about = "Inspect OCR analysis responses as structured documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print page text
    Text {
        /// Response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Reorder lines column-aware instead of detection order
        #[arg(short, long)]
        reading_order: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print detected tables, one row per line, cells tab-separated
    Tables {
        /// Response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print detected form fields
    Form {
        /// Response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only fields whose key contains this text (case-insensitive)
        #[arg(short, long, value_name = "KEY")]
        search: Option<String>,
    },

    /// Serialize the resolved document to JSON
    Json {
        /// Response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Response JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Text {
            input,
            reading_order,
            output,
        } => {
            let doc = docugraph::parse_file(&input)?;
            let mut text = String::new();
            for page in doc.pages() {
                if reading_order {
                    text.push_str(&page.get_text_in_reading_order());
                } else {
                    text.push_str(page.text());
                }
            }
            write_output(output.as_deref(), &text)?;
        }

        Commands::Tables { input } => {
            let doc = docugraph::parse_file(&input)?;
            for (page_index, page) in doc.pages().iter().enumerate() {
                for (table_index, table) in page.tables().iter().enumerate() {
                    println!(
                        "{}",
                        format!("Page {} table {}", page_index + 1, table_index + 1)
                            .cyan()
                            .bold()
                    );
                    for row in table.rows() {
                        let cells: Vec<&str> = row.cells().iter().map(|c| c.text()).collect();
                        println!("{}", cells.join("\t"));
                    }
                    println!();
                }
            }
        }

        Commands::Form { input, search } => {
            let doc = docugraph::parse_file(&input)?;
            for (page_index, page) in doc.pages().iter().enumerate() {
                println!("{}", format!("Page {}", page_index + 1).cyan().bold());
                let fields: Vec<_> = match &search {
                    Some(key) => page.form().search_fields_by_key(key),
                    None => page.form().fields().iter().collect(),
                };
                if fields.is_empty() {
                    println!("{}", "(no fields)".dimmed());
                }
                for field in fields {
                    let key = field.key().map(|k| k.text()).unwrap_or_default();
                    let value = field.value().map(|v| v.text()).unwrap_or_default();
                    println!("{}: {}", key.green(), value);
                }
                println!();
            }
        }

        Commands::Json {
            input,
            compact,
            output,
        } => {
            let doc = docugraph::parse_file(&input)?;
            let json = if compact {
                serde_json::to_string(&doc)?
            } else {
                serde_json::to_string_pretty(&doc)?
            };
            write_output(output.as_deref(), &json)?;
        }

        Commands::Info { input } => {
            let doc = docugraph::parse_file(&input)?;
            print_info(&input, &doc);
        }
    }

    Ok(())
}

fn print_info(input: &std::path::Path, doc: &Document) {
    println!("{}", "Document Information".cyan().bold());
    println!("  File:   {}", input.display());
    println!("  Pages:  {}", doc.page_count());

    for (page_index, page) in doc.pages().iter().enumerate() {
        let columns = page
            .get_lines_in_reading_order()
            .last()
            .map(|line| line.column + 1)
            .unwrap_or(0);
        println!(
            "  Page {}: {} lines, {} tables, {} fields, {} columns",
            page_index + 1,
            page.lines().len(),
            page.tables().len(),
            page.form().len(),
            columns
        );
    }
}

fn write_output(output: Option<&std::path::Path>, content: &str) -> std::io::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
