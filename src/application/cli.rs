#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Password;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Contact;
use crate::domain::models::ContactsApi;
use crate::domain::models::LoginCredentials;
use crate::domain::models::Operation;
use crate::domain::services::submit_error_message;
use crate::domain::services::Storage;
use crate::infrastructure::api::mekody::MekodyApi;

pub fn help_text() -> String {
    let text = r#"
DASHBOARD:
- Up/Down - Select a contact
- Enter, v - View the selected contact
- n - New contact
- e - Edit the selected contact
- d - Delete the selected contact, after confirmation
- r - Reload the contact list
- l - Log out
- x, CTRL+X - Dismiss the newest notification
- q, CTRL+C - Quit

FORMS:
- Tab, Down - Next field
- Shift+Tab, Up - Previous field
- Left/Right - Cycle services when the service field is focused
- Enter - Submit, or insert a new line in the message field
- CTRL+S - Submit from any field
- Esc - Cancel
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

/// One line summary used by `contacts list`.
pub fn format_contact(contact: &Contact) -> String {
    let mut res = format!(
        "- (ID: {}) {} <{}>",
        contact.id, contact.nom_complet, contact.courriel
    );

    if let Some(entreprise) = contact.entreprise.as_deref().filter(|e| return !e.is_empty()) {
        res = format!("{res}, {entreprise}");
    }

    if let Some(service) = contact
        .service_interesse
        .as_deref()
        .filter(|s| return !s.is_empty())
    {
        res = format!("{res}, {service}");
    }

    return format!("{res}, {}", contact.created_on_short());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn require_session(storage: &Storage) -> Result<()> {
    if !storage.is_authenticated().await? {
        bail!("You are not logged in. Run `mekody-admin login` first.");
    }

    return Ok(());
}

async fn login() -> Result<()> {
    let theme = ColorfulTheme::default();
    let courriel: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;
    let mot_de_passe = Password::with_theme(&theme)
        .with_prompt("Mot de passe")
        .interact()?;

    let credentials = LoginCredentials {
        courriel,
        mot_de_passe,
    };

    if let Err(err) = MekodyApi::default().login(&credentials).await {
        bail!(submit_error_message(Operation::Login, &err));
    }

    Storage::default().store_session_marker().await?;
    println!("{}", Paint::green("Connexion réussie!"));
    return Ok(());
}

async fn logout() -> Result<()> {
    Storage::default().clear_session_marker().await?;
    println!("Déconnexion réussie");
    return Ok(());
}

async fn print_contacts() -> Result<()> {
    require_session(&Storage::default()).await?;

    let contacts = MekodyApi::default().list_contacts().await?;
    if contacts.is_empty() {
        println!("Aucun contact trouvé");
        return Ok(());
    }

    let lines = contacts
        .iter()
        .map(|contact| {
            return format_contact(contact);
        })
        .collect::<Vec<String>>();

    println!("{}", lines.join("\n"));
    return Ok(());
}

async fn delete_contact(id: &str, skip_confirm: bool) -> Result<()> {
    require_session(&Storage::default()).await?;

    let api = MekodyApi::default();
    let contacts = api.list_contacts().await?;
    let contact = match contacts.iter().find(|contact| return contact.id.to_string() == id) {
        Some(contact) => contact,
        None => bail!(format!("No contact found with ID {id}")),
    };

    if !skip_confirm {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Êtes-vous sûr de vouloir supprimer {} ?",
                contact.nom_complet
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    if let Err(err) = api.delete_contact(&contact.id).await {
        bail!(submit_error_message(Operation::Delete, &err));
    }

    println!("Contact supprimé avec succès");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for mekody-admin")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running with environment variable RUST_LOG=mekody")
        )
        .subcommand(
            Command::new("storage-path").about("Output path to the file holding the session marker.")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_contacts_delete() -> Command {
    return Command::new("delete")
        .about("Delete a contact after confirmation.")
        .arg(
            clap::Arg::new("id")
                .short('i')
                .long("id")
                .help("Contact ID, as printed by `contacts list`.")
                .num_args(1)
                .required(true),
        )
        .arg(
            clap::Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Skip the confirmation prompt.")
                .action(ArgAction::SetTrue),
        );
}

fn subcommand_contacts() -> Command {
    return Command::new("contacts")
        .about("Manage contact requests without opening the interface.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List every contact request."))
        .subcommand(subcommand_contacts_delete());
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiUrl.to_string())
        .long(ConfigKey::ApiUrl.to_string())
        .env("MEKODY_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the Mekody API. [default: {}]",
            Config::default(ConfigKey::ApiUrl)
        ))
        .global(true);
}

fn arg_notification_timeout() -> Arg {
    return Arg::new(ConfigKey::NotificationTimeout.to_string())
        .long(ConfigKey::NotificationTimeout.to_string())
        .env("MEKODY_NOTIFICATION_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time in milliseconds before a notification is removed. [default: {}]",
            Config::default(ConfigKey::NotificationTimeout)
        ))
        .global(true);
}

fn arg_storage_file() -> Arg {
    return Arg::new(ConfigKey::StorageFile.to_string())
        .long(ConfigKey::StorageFile.to_string())
        .env("MEKODY_STORAGE_FILE")
        .num_args(1)
        .help(format!(
            "Path to the file holding the session marker. [default: {}]",
            Config::default(ConfigKey::StorageFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("DASHBOARD:") || line.starts_with("FORMS:") {
                return Paint::new(format!("KEYS {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("mekody-admin")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("start").about("Open the admin interface. This is the default."))
        .subcommand(Command::new("login").about("Log in and store the session marker."))
        .subcommand(Command::new("logout").about("Remove the session marker."))
        .subcommand(subcommand_contacts())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_api_url())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MEKODY_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_notification_timeout())
        .arg(arg_storage_file());
}

/// Handles one off subcommands. Returns true when the interface should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = Config::log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("storage-path", _)) => {
                    Config::load(vec![&matches, debug_matches]).await?;
                    println!("{}", Config::get(ConfigKey::StorageFile));
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("start", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("login", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            login().await?;
            return Ok(false);
        }
        Some(("logout", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            logout().await?;
            return Ok(false);
        }
        Some(("contacts", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("list", list_matches)) => {
                Config::load(vec![&matches, subcmd_matches, list_matches]).await?;
                print_contacts().await?;
                return Ok(false);
            }
            Some(("delete", delete_matches)) => {
                Config::load(vec![&matches, subcmd_matches, delete_matches]).await?;
                if let Some(id) = delete_matches.get_one::<String>("id") {
                    delete_contact(id, delete_matches.get_flag("yes")).await?;
                } else {
                    subcommand_contacts_delete().print_long_help()?;
                }
                return Ok(false);
            }
            _ => {
                subcommand_contacts().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
