//! gridsmith CLI - writes the sample workbooks used by the converter examples

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridsmith::{catalog, dangling_references, generate_all, read_workbook, WorkbookKind};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridsmith")]
#[command(author, version, about = "Generate the example XLSX workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate workbooks (the default when no command is given)
    Generate {
        /// Output directory (default: the workspace `examples/` directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only generate this workbook; repeatable (default: all)
        #[arg(short, long = "workbook", value_name = "KIND")]
        workbooks: Vec<WorkbookKind>,
    },

    /// List the workbooks that can be generated
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show sheets, formulas and dangling sheet references of an XLSX file
    Info {
        /// Input workbook
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Generate {
        output_dir: None,
        workbooks: Vec::new(),
    });

    let result = match command {
        Commands::Generate {
            output_dir,
            workbooks,
        } => run_generate(output_dir, workbooks),
        Commands::List { json } => list(json).map(|()| ExitCode::SUCCESS),
        Commands::Info { input } => show_info(&input).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `<workspace>/examples`, fixed at build time so the caller's working
/// directory does not matter
fn default_output_dir() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .join("examples")
}

fn run_generate(output_dir: Option<PathBuf>, workbooks: Vec<WorkbookKind>) -> Result<ExitCode> {
    println!("🚀 Generating XLSX files for examples...");
    println!();

    if !gridsmith::xlsx_available() {
        println!("❌ Error: XLSX support is not compiled into this binary.");
        println!("Please rebuild it with: cargo build -p gridsmith-cli --features xlsx");
        return Ok(ExitCode::SUCCESS);
    }

    let out_dir = output_dir.unwrap_or_else(default_output_dir);
    let kinds = if workbooks.is_empty() {
        WorkbookKind::ALL.to_vec()
    } else {
        workbooks
    };
    debug!(out_dir = %out_dir.display(), count = kinds.len(), "generating workbooks");

    let created = generate_all(&out_dir, &kinds, |kind, _| {
        println!("✅ Created {}", kind.file_name());
    });

    match created {
        Ok(_) => {
            print_next_steps();
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let err = anyhow::Error::from(err);
            println!("❌ Error creating files: {err}");
            for cause in err.chain().skip(1) {
                println!("   caused by: {cause}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_next_steps() {
    println!();
    println!("✨ All XLSX files created successfully!");
    println!();
    println!("You can now:");
    println!("1. Upload these files to Google Sheets (File → Import)");
    println!("2. Share the sheets publicly");
    println!("3. Update the JSON configuration files with the URLs");
    println!("4. Run the converter to generate code");
}

fn list(json: bool) -> Result<()> {
    let entries = catalog();

    if json {
        let text = serde_json::to_string_pretty(&entries).context("Failed to serialize catalog")?;
        println!("{text}");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.file_name);
        println!("    {}", entry.description);
        println!("    sheets: {}", entry.sheets.join(", "));
    }
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let workbook =
        read_workbook(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());
        match sheet.used_range() {
            Some(range) => println!("    Used range: {}", range),
            None => println!("    Used range: empty"),
        }
        println!("    Formulas: {}", sheet.formula_cells().count());
        println!("    Merged regions: {}", sheet.merged_regions().len());
    }

    let dangling = dangling_references(&workbook);
    println!();
    if dangling.is_empty() {
        println!("No dangling sheet references");
    } else {
        println!("Dangling sheet references: {}", dangling.len());
        for reference in &dangling {
            println!("  {}", reference);
        }
    }

    Ok(())
}
