// Entry point and high-level CLI flow.
//
// Every dashboard page is a subcommand. With no subcommand (or `menu`) the
// binary runs an interactive page menu, prompting for each page's filters,
// until the user chooses to exit.
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use gtd_dashboard::catalog::DEFAULT_YEAR;
use gtd_dashboard::config::Config;
use gtd_dashboard::context::DataContext;
use gtd_dashboard::error::AppError;
use gtd_dashboard::pages::{self, PAGES};
use gtd_dashboard::views::groups::top_groups;

#[derive(Debug, Parser)]
#[command(name = "gtd_dashboard", about = "Global terrorism analysis, 1970-2017")]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args)]
struct PathArgs {
    /// Incident CSV
    #[arg(long, global = true, default_value = "data1.csv")]
    incidents: PathBuf,

    /// Military spending CSV (ISO-8859-1)
    #[arg(long, global = true, default_value = "Militaryspending.csv")]
    spending: PathBuf,

    /// Directory for exported CSV/JSON files
    #[arg(long, global = true, default_value = "reports")]
    out_dir: PathBuf,

    /// Rows shown in console previews
    #[arg(long, global = true, default_value_t = 10)]
    preview_rows: usize,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map points and yearly trend for one year
    Activities {
        #[arg(long, default_value_t = DEFAULT_YEAR)]
        year: i32,
    },
    /// Attacks per year by region
    Regions {
        /// Repeat to chart several regions; none charts all
        #[arg(long = "region")]
        regions: Vec<String>,
    },
    /// Top-10 groups, scope of operation and drill-downs
    Groups {
        /// Repeat to chart several groups; none charts all ten
        #[arg(long = "group")]
        groups: Vec<String>,
    },
    /// Targets of one top-10 group per year
    Targets {
        #[arg(long)]
        group: String,
    },
    /// Military spending against casualties
    Spending,
    /// Dataset summary (summary.json)
    Summary,
    /// Interactive page menu
    Menu,
}

impl From<PathArgs> for Config {
    fn from(args: PathArgs) -> Self {
        Config {
            incidents_path: args.incidents,
            spending_path: args.spending,
            out_dir: args.out_dir,
            preview_rows: args.preview_rows,
        }
    }
}

/// Read a single line of input after printing `prompt`.
///
/// Returns `None` once the input is closed.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Comma-separated list; blank means "everything".
fn read_list<R: BufRead>(input: &mut R, prompt: &str) -> Option<Vec<String>> {
    let line = read_line(input, prompt)?;
    Some(
        line.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Ask the user whether to go back to the page menu.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N` or the
/// input is closed.
fn prompt_back_to_menu<R: BufRead>(input: &mut R) -> bool {
    loop {
        let Some(resp) = read_line(input, "Back to page selection (Y/N): ") else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

enum MenuStep {
    Ran(Result<(), AppError>),
    Invalid,
    Closed,
}

fn run_page<R: BufRead>(ctx: &DataContext, config: &Config, input: &mut R) -> MenuStep {
    let Some(choice) = read_line(input, "Enter choice: ") else {
        return MenuStep::Closed;
    };
    let result = match choice.as_str() {
        "1" => {
            let Some(raw) = read_line(input, &format!("Year [{}]: ", DEFAULT_YEAR)) else {
                return MenuStep::Closed;
            };
            match raw.parse::<i32>() {
                Ok(year) => pages::activities_page(ctx, config, year),
                Err(_) if raw.is_empty() => pages::activities_page(ctx, config, DEFAULT_YEAR),
                Err(_) => {
                    println!("Invalid year.\n");
                    return MenuStep::Invalid;
                }
            }
        }
        "2" => {
            let Some(regions) = read_list(input, "Regions (comma-separated, blank for all): ")
            else {
                return MenuStep::Closed;
            };
            pages::regions_page(ctx, config, &regions)
        }
        "3" => {
            let Some(groups) = read_list(input, "Groups (comma-separated, blank for top 10): ")
            else {
                return MenuStep::Closed;
            };
            pages::groups_page(ctx, config, &groups)
        }
        "4" => {
            if let Ok(top) = top_groups(ctx.incidents()) {
                for g in &top {
                    println!("  {:>2}. {}", g.rank, g.group);
                }
            }
            let Some(group) = read_line(input, "Group: ") else {
                return MenuStep::Closed;
            };
            pages::targets_page(ctx, config, &group)
        }
        "5" => pages::spending_page(ctx, config),
        "6" => pages::summary_page(ctx, config),
        _ => {
            println!("Invalid choice. Please enter 1 to 6.\n");
            return MenuStep::Invalid;
        }
    };
    MenuStep::Ran(result)
}

fn run_menu<R: BufRead>(ctx: &DataContext, config: &Config, input: &mut R) {
    loop {
        println!("Global Terrorism Analysis - go to:");
        for (i, page) in PAGES.iter().enumerate() {
            println!("[{}] {}", i + 1, page);
        }
        println!("[6] Summary\n");

        match run_page(ctx, config, input) {
            MenuStep::Ran(Err(e)) => {
                log::warn!("page failed: {}", e);
                println!("No data: {}\n", e);
            }
            MenuStep::Ran(Ok(())) => {}
            MenuStep::Invalid => continue,
            MenuStep::Closed => {
                println!("\nInput closed. Exiting the program.");
                break;
            }
        }
        if !prompt_back_to_menu(input) {
            println!("Exiting the program.");
            break;
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from(cli.paths);
    let ctx = DataContext::open(&config)?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Activities { year } => pages::activities_page(&ctx, &config, year),
        Command::Regions { regions } => pages::regions_page(&ctx, &config, &regions),
        Command::Groups { groups } => pages::groups_page(&ctx, &config, &groups),
        Command::Targets { group } => pages::targets_page(&ctx, &config, &group),
        Command::Spending => pages::spending_page(&ctx, &config),
        Command::Summary => pages::summary_page(&ctx, &config),
        Command::Menu => {
            run_menu(&ctx, &config, &mut io::stdin().lock());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
