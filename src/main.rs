use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger::cli::{handle_admin_command, handle_user_command, AdminCommands, CreateArgs, UserCommands};
use ledger::config::{paths::LedgerPaths, settings::Settings};
use ledger::models::AccountNumber;
use ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Flat-file account ledger",
    long_about = "A small account ledger: open accounts, log in, and move money \
                  through deposits, withdrawals, and transfers. Accounts are kept \
                  as fixed-width records in a single data file."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new account
    Create(CreateArgs),

    /// Administrative commands (requires the admin secret)
    Admin {
        /// Admin secret (prompted when omitted)
        #[arg(long, env = "LEDGER_ADMIN_SECRET", hide_env_values = true)]
        secret: Option<String>,

        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Account holder commands (requires the account password)
    User {
        /// Your account number
        #[arg(short, long)]
        account: AccountNumber,

        /// Your password (prompted when omitted)
        #[arg(short, long, env = "LEDGER_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[command(subcommand)]
        command: UserCommands,
    },

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ledger::logging::init(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Create(args)) => {
            let storage = Storage::new(&paths, &settings)?;
            ledger::cli::account::create(&storage, &settings, args)?;
        }
        Some(Commands::Admin { secret, command }) => {
            let storage = Storage::new(&paths, &settings)?;
            handle_admin_command(&storage, &settings, secret, command)?;
        }
        Some(Commands::User {
            account,
            password,
            command,
        }) => {
            let storage = Storage::new(&paths, &settings)?;
            handle_user_command(&storage, &settings, account, password, command)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                println!("Initialized ledger at: {}", paths.base_dir().display());
                println!("Change admin_secret in {} before use.", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Record file:    {}", settings.record_file(&paths).display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!(
                "  Admin secret:    {}",
                if settings.uses_default_admin_secret() {
                    "default (change it!)"
                } else {
                    "custom"
                }
            );
        }
        None => {
            println!("ledger - flat-file account ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
