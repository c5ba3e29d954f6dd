//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};

use warung_kiosk::booking::form::{FieldValidator, ReservationForm};
use warung_kiosk::booking::whatsapp::{open_in_browser, reservation_link};
use warung_kiosk::content::SiteContent;
use warung_kiosk::content::menu::FILTER_ALL;
use warung_kiosk::core::config::Config;
use warung_kiosk::core::errors::Result;

/// Warung Kiosk — terminal storefront for Warung Kumpul 88.
#[derive(Debug, Parser)]
#[command(
    name = "warung",
    author,
    version,
    about = "Warung Kiosk - terminal storefront",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Launch the kiosk TUI.
    Run(RunArgs),
    /// Print the menu board.
    Menu(MenuArgs),
    /// Build a WhatsApp reservation link from flags.
    Reserve(ReserveArgs),
    /// Show the effective configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct RunArgs {
    /// Content TOML file replacing the built-in menu and testimonials.
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,
}

#[derive(Debug, Clone, Args, Default)]
struct MenuArgs {
    /// Show only cards carrying this category tag.
    #[arg(long, value_name = "TAG", default_value = FILTER_ALL)]
    category: String,
}

#[derive(Debug, Clone, Args)]
struct ReserveArgs {
    /// Guest name.
    #[arg(long)]
    name: String,
    /// Reservation date (YYYY-MM-DD).
    #[arg(long)]
    date: String,
    /// Reservation time (HH:MM).
    #[arg(long)]
    time: String,
    /// Freeform note.
    #[arg(long, default_value = "")]
    note: String,
    /// Print the link instead of opening it.
    #[arg(long)]
    print_only: bool,
}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    /// Write the default config to the config path if absent.
    #[arg(long)]
    init: bool,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// Dispatch the parsed CLI.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        control::set_override(false);
    }
    let mut config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Run(args) => {
            if args.content.is_some() {
                config.paths.content_file.clone_from(&args.content);
            }
            warung_kiosk::ui::run(config, cli.no_color)
        }
        Command::Menu(args) => cmd_menu(&config, &args.category),
        Command::Reserve(args) => cmd_reserve(&config, args),
        Command::Config(args) => cmd_config(&config, args.init),
        Command::Completions(args) => {
            let mut command = Cli::command();
            generate(args.shell, &mut command, "warung", &mut io::stdout());
            Ok(())
        }
    }
}

fn cmd_menu(config: &Config, category: &str) -> Result<()> {
    let (content, fallback) =
        SiteContent::load_or_builtin(config.paths.content_file.as_deref());
    if let Some(err) = fallback {
        eprintln!("{} {err}", "warning:".yellow());
    }

    println!(
        "{}",
        format!("  {}", config.contact.restaurant_name).blue().bold()
    );
    println!("  {}\n", content.tagline.dimmed());

    let mut shown = 0usize;
    for item in &content.menu {
        if !item.matches_filter(category) {
            continue;
        }
        shown += 1;
        println!(
            "  {:<24} {:>6}  {}",
            item.name.bold(),
            item.price_label().green(),
            item.categories.join(" · ").dimmed()
        );
        println!("      {}", item.description);
    }
    if shown == 0 {
        println!(
            "  {}",
            format!("no cards match category {category:?}").dimmed()
        );
    }
    Ok(())
}

fn cmd_reserve(config: &Config, args: &ReserveArgs) -> Result<()> {
    let form = ReservationForm {
        name: args.name.clone(),
        date: args.date.clone(),
        time: args.time.clone(),
        note: args.note.clone(),
        ..ReservationForm::default()
    };
    form.validate(&FieldValidator::new())?;

    let url = reservation_link(
        &config.contact.whatsapp_phone,
        &config.contact.restaurant_name,
        &form,
    )?;
    println!("{}", url.as_str().underline());
    if !args.print_only {
        open_in_browser(&url)?;
        println!("{}", "opened in browser".green());
    }
    Ok(())
}

fn cmd_config(config: &Config, init: bool) -> Result<()> {
    if init && !config.paths.config_file.exists() {
        if let Some(parent) = config.paths.config_file.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| warung_kiosk::core::errors::KioskError::io(parent, e))?;
        }
        std::fs::write(&config.paths.config_file, toml::to_string_pretty(config)?)
            .map_err(|e| warung_kiosk::core::errors::KioskError::io(&config.paths.config_file, e))?;
        println!(
            "{} {}",
            "wrote".green(),
            config.paths.config_file.display()
        );
        return Ok(());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn reserve_args_parse() {
        let cli = Cli::parse_from([
            "warung",
            "reserve",
            "--name",
            "Budi",
            "--date",
            "2025-05-01",
            "--time",
            "19:00",
            "--note",
            "window seat",
            "--print-only",
        ]);
        let Command::Reserve(args) = cli.command else {
            panic!("expected reserve");
        };
        assert_eq!(args.name, "Budi");
        assert!(args.print_only);
    }

    #[test]
    fn menu_defaults_to_all() {
        let cli = Cli::parse_from(["warung", "menu"]);
        let Command::Menu(args) = cli.command else {
            panic!("expected menu");
        };
        assert_eq!(args.category, FILTER_ALL);
    }
}
