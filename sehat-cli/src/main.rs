mod draft;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sehat::auth::{LoginFlow, LoginForm};
use sehat::directory::{DirectoryClient, HospitalDirectory, HospitalFilters};
use sehat::nearby::{FixedLocation, GeoPoint, NearbyFinder, SearchStatus};
use sehat::notify::{NoticeLevel, Notification, Route};
use sehat::registration::{AccountType, RegistrationAction, RegistrationManager, Step};
use sehat::{ApiClient, DisplayTheme, SehatConfig};

use draft::Draft;

#[derive(Parser, Debug)]
#[command(name = "sehat", version, about = "Sehat Station client")]
struct Cli {
    /// Config file (defaults to ./sehat.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the dark theme
    #[arg(long, global = true)]
    dark: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the registration wizard over a draft file and submit it.
    Register {
        /// TOML or JSON file with `basic` and `secondary` sections
        #[arg(long)]
        draft: PathBuf,
        /// Stop after the review step
        #[arg(long)]
        dry_run: bool,
    },
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        /// Falls back to SEHAT_PASSWORD
        #[arg(long, env = "SEHAT_PASSWORD", hide_env_values = true)]
        password: String,
        /// patient or doctor
        #[arg(long = "as", default_value = "patient")]
        account_type: AccountType,
    },
    /// List hospitals from the directory.
    Hospitals {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        min_rating: Option<f64>,
    },
    /// Find hospitals around a point or an address.
    Nearby {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        address: Option<String>,
        /// Calculate a driving route to the n-th listed hospital (1-based)
        #[arg(long)]
        route: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SehatConfig::load_from(path)?,
        None => SehatConfig::load()?,
    };
    if cli.dark {
        config.display.theme = DisplayTheme::Dark;
    }
    tracing::debug!(api = %config.api.base_url, theme = %config.display.theme, "configuration ready");

    match cli.command {
        Commands::Register { draft, dry_run } => register(&config, &draft, dry_run).await,
        Commands::Login { email, password, account_type } => {
            login(&config, LoginForm::new(account_type, email, password)).await
        }
        Commands::Hospitals { search, department, service, min_rating } => {
            let filters = HospitalFilters { department, service, min_rating };
            hospitals(&config, search, filters).await
        }
        Commands::Nearby { lat, lon, address, route } => {
            let origin = lat.zip(lon).map(|(lat, lon)| GeoPoint::new(lat, lon));
            nearby(&config, origin, address, route).await
        }
    }
}

fn print_notices(notices: Vec<Notification>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => println!("{notice}"),
            NoticeLevel::Warn | NoticeLevel::Error => eprintln!("{notice}"),
        }
    }
}

fn print_navigation(route: Option<Route>) {
    if let Some(route) = route {
        println!("-> {}", route.path());
    }
}

async fn register(config: &SehatConfig, path: &std::path::Path, dry_run: bool) -> Result<()> {
    let draft = Draft::load(path)?;
    let theme = config.display.theme;
    let mut manager = RegistrationManager::from_config(config);

    manager.dispatch(RegistrationAction::UpdateBasic { data: draft.basic });
    manager.dispatch(RegistrationAction::Advance);
    manager.dispatch(RegistrationAction::UpdateSecondary { data: draft.secondary });
    manager.dispatch(RegistrationAction::Advance);
    manager.run_pending().await;
    print_notices(manager.drain_notifications());

    let context = manager.context();
    if context.current_step() != Step::Review {
        let step = context.current_step();
        eprintln!("{}", theme.heading(step.title()));
        for (field, message) in context.field_errors() {
            eprintln!("  {field}: {message}");
        }
        bail!("Draft is incomplete at step '{}'", step.title());
    }

    print!("{}", context.review().render(theme));
    if dry_run {
        return Ok(());
    }

    println!("{}...", manager.submit_control().label);
    manager.dispatch(RegistrationAction::Submit);
    manager.run_pending().await;
    print_notices(manager.drain_notifications());

    match manager.take_navigation() {
        Some(route) => {
            print_navigation(Some(route));
            Ok(())
        }
        None => bail!("Registration was not accepted"),
    }
}

async fn login(config: &SehatConfig, form: LoginForm) -> Result<()> {
    let mut flow = LoginFlow::from_config(config);
    flow.set_form(form);

    let logged_in = flow.submit().await;
    for (field, message) in flow.errors() {
        eprintln!("  {field}: {message}");
    }
    print_notices(flow.drain_notifications());

    if !logged_in {
        bail!("Login failed");
    }
    println!("Token saved to {}", config.storage.token_path.display());
    print_navigation(flow.take_navigation());
    Ok(())
}

async fn hospitals(config: &SehatConfig, search: Option<String>, filters: HospitalFilters) -> Result<()> {
    let theme = config.display.theme;
    let client = DirectoryClient::new(ApiClient::new(&config.api));
    let mut directory = HospitalDirectory::load(&client).await;

    if let Some(query) = search {
        directory.search(query);
    }
    directory.apply_filters(filters);

    let visible = directory.visible();
    println!("{}", theme.heading(&format!("SehatStation Hospitals ({})", visible.len())));
    for hospital in visible {
        print!("{}", hospital.render(theme));
    }
    Ok(())
}

async fn nearby(
    config: &SehatConfig,
    origin: Option<GeoPoint>,
    address: Option<String>,
    route: Option<usize>,
) -> Result<()> {
    let theme = config.display.theme;
    let mut finder = NearbyFinder::from_config(&config.nearby);

    match (origin, address) {
        (Some(point), _) => finder.locate(&FixedLocation(point)).await,
        (None, Some(address)) => finder.search_address(&address).await,
        (None, None) => bail!("Pass --lat/--lon or --address"),
    }
    print_notices(finder.drain_notifications());

    if let Some(error) = finder.location_error() {
        bail!("{error}");
    }
    if finder.search_location().is_none() {
        return Ok(());
    }

    println!("{} {}", theme.heading("Your Location:"), finder.address());
    if let SearchStatus::Failed(message) = finder.status() {
        bail!("{message}");
    }

    for (i, hospital) in finder.hospitals().iter().enumerate() {
        println!("{:>2}. {}  {}", i + 1, theme.accent(&hospital.name), hospital.distance_label());
        if !hospital.address.is_empty() {
            println!("    {}", theme.muted(&hospital.address));
        }
        println!("    {}", hospital.directions_url);
    }

    if let Some(n) = route {
        let index = n.checked_sub(1).context("--route is 1-based")?;
        if index >= finder.hospitals().len() {
            bail!("No hospital number {n} in the list");
        }
        if let Some(summary) = finder.route_to(index).await {
            let name = &finder.hospitals()[index].name;
            println!("{} {}: {}", theme.heading("Route to"), name, summary.describe());
        }
        print_notices(finder.drain_notifications());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_login_password_from_environment() {
        std::env::set_var("SEHAT_PASSWORD", "pw123456");
        let cli = Cli::try_parse_from(["sehat", "login", "--email", "a@b.com"]).unwrap();
        std::env::remove_var("SEHAT_PASSWORD");

        match cli.command {
            Commands::Login { email, password, account_type } => {
                assert_eq!(email, "a@b.com");
                assert_eq!(password, "pw123456");
                assert_eq!(account_type, AccountType::Patient);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
