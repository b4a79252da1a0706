//! `purplepaw` console front-end.
//!
//! ```text
//! purplepaw login <email> <password>
//! purplepaw logout
//! purplepaw whoami
//! purplepaw users [--page N]
//! purplepaw clients [search] [--page N]
//! purplepaw inventory [--page N]
//! purplepaw appointments [YYYY-MM-DD] [--page N]
//! purplepaw pets [--page N]
//! purplepaw history <pet-id> [--page N]
//! ```
//!
//! Pages are numbered from 1. The session survives between runs in the data
//! directory.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use anyhow::{Context, bail};
    use chrono::{Local, NaiveDate};
    use clap::{Args, Parser, Subcommand};

    use purplepaw_api::{PageSource, SEARCH_KEY};
    use purplepaw_table::{Column, FetchOutcome, TableEvent, TableRow};
    use purplepaw_web::console::{render_layout, render_table};
    use purplepaw_web::forms::LoginForm;
    use purplepaw_web::views::{ListController, appointments, clients, inventory, pets, users};
    use purplepaw_web::{ClientConfig, Level, Navigation, Shell, SubmitOutcome};

    #[derive(Parser, Debug)]
    #[command(name = "purplepaw", about = "PurplePaw clinic console")]
    pub struct Cli {
        /// Overrides the API base URL from the environment.
        #[arg(long, global = true)]
        api_url: Option<String>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct Paging {
        /// Page to show, starting at 1.
        #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,
    }

    impl Paging {
        /// Zero-based index the list state works with.
        fn index(self) -> u32 {
            self.page.map_or(0, |p| p - 1)
        }
    }

    #[derive(Subcommand, Debug, PartialEq, Eq)]
    enum Command {
        /// Sign in and store the session.
        Login { email: String, password: String },
        /// Forget the stored session.
        Logout,
        /// Show the signed-in user.
        Whoami,
        /// User management (veterinarians only).
        Users {
            #[command(flatten)]
            paging: Paging,
        },
        /// Client directory, optionally filtered by name.
        Clients {
            search: Option<String>,
            #[command(flatten)]
            paging: Paging,
        },
        /// Inventory with low-stock alerts.
        Inventory {
            #[command(flatten)]
            paging: Paging,
        },
        /// Agenda for a day, today by default.
        Appointments {
            date: Option<NaiveDate>,
            #[command(flatten)]
            paging: Paging,
        },
        /// Pets of the signed-in client.
        Pets {
            #[command(flatten)]
            paging: Paging,
        },
        /// Clinical history of one pet.
        History {
            pet_id: String,
            #[command(flatten)]
            paging: Paging,
        },
    }

    fn flush_notifications(shell: &Shell) {
        for n in shell.notifications().drain() {
            match n.level {
                Level::Error => eprintln!("error: {}", n.message),
                Level::Success | Level::Info => println!("{}", n.message),
            }
        }
    }

    /// Gate on the route, then print the layout. `false` when redirected.
    fn enter(shell: &Shell, path: &str) -> bool {
        match shell.navigate(path) {
            Navigation::Show { path: shown, .. } if shown == path => {
                if let Some(layout) = shell.layout() {
                    print!("{}", render_layout(&layout));
                    println!();
                }
                true
            }
            Navigation::Show { path: shown, .. } => {
                eprintln!("{path} is not available; redirected to {shown}");
                false
            }
            Navigation::Pending => false,
        }
    }

    async fn show<S>(
        shell: &Shell,
        mut controller: ListController<S>,
        columns: &[Column<S::Row>],
        page: u32,
    ) -> Option<Vec<S::Row>>
    where
        S: PageSource,
        S::Row: TableRow + Clone,
    {
        let mut outcome = controller.refresh().await;
        if page > 0 && matches!(outcome, FetchOutcome::Applied) {
            if let Some(next) = controller.handle(&TableEvent::PageChange { page }).await {
                outcome = next;
            }
        }
        println!("{}", render_table(&controller.view(columns)).trim_end());
        flush_notifications(shell);
        match outcome {
            FetchOutcome::Applied => Some(controller.state().rows().to_vec()),
            _ => None,
        }
    }

    pub async fn run(cli: Cli) -> anyhow::Result<()> {
        let mut config = ClientConfig::from_env().context("reading configuration")?;
        if let Some(api_url) = cli.api_url {
            config.api_url = api_url;
        }
        purplepaw_observability::init(config.log_format);

        let shell = Shell::open(config).context("starting the client")?;

        match cli.command {
            Command::Login { email, password } => {
                let outcome = shell.auth().login(&LoginForm { email, password }).await;
                flush_notifications(&shell);
                match outcome {
                    SubmitOutcome::SignedIn { redirect } => {
                        enter(&shell, redirect);
                    }
                    SubmitOutcome::Invalid(errors) => {
                        let fields: Vec<String> = errors
                            .iter()
                            .map(|(field, message)| format!("{field}: {message}"))
                            .collect();
                        bail!("invalid sign-in form\n{}", fields.join("\n"));
                    }
                    SubmitOutcome::Failed(err) => bail!("sign-in failed ({})", err.code),
                }
            }
            Command::Logout => {
                let to = shell.auth().logout();
                println!("signed out; next: {to}");
            }
            Command::Whoami => match shell.session().snapshot().identity() {
                Some(identity) => {
                    println!("{} <{}>", identity.display_name(), identity.email);
                    let roles: Vec<_> = identity.roles.iter().map(|r| r.as_str()).collect();
                    println!("roles: {}", roles.join(", "));
                }
                None => println!("not signed in"),
            },
            Command::Users { paging } => {
                if enter(&shell, "/user-management") {
                    show(&shell, shell.users(), &users::columns(), paging.index()).await;
                }
            }
            Command::Clients { search, paging } => {
                if enter(&shell, "/clients") {
                    let mut controller = shell.clients();
                    if let Some(term) = search {
                        controller.request_mut().set_filter(SEARCH_KEY, &term);
                    }
                    show(&shell, controller, &clients::columns(), paging.index()).await;
                }
            }
            Command::Inventory { paging } => {
                if enter(&shell, "/inventory") {
                    if let Some(items) =
                        show(&shell, shell.inventory(), &inventory::columns(), paging.index()).await
                    {
                        let alerts = inventory::alert_lines(&items);
                        if !alerts.is_empty() {
                            println!("\nLow stock:");
                            for line in alerts {
                                println!("  {line}");
                            }
                        }
                    }
                }
            }
            Command::Appointments { date, paging } => {
                if enter(&shell, "/appointments") {
                    let date = date.unwrap_or_else(|| Local::now().date_naive());
                    if let Some(controller) = shell.appointments(date) {
                        println!("Appointments for {date}");
                        show(&shell, controller, &appointments::columns(), paging.index()).await;
                    }
                }
            }
            Command::Pets { paging } => {
                if enter(&shell, "/my-pets") {
                    if let Some(controller) = shell.pets() {
                        show(&shell, controller, &pets::columns(), paging.index()).await;
                    }
                }
            }
            Command::History { pet_id, paging } => {
                if enter(&shell, &pets::history_path(&pet_id)) {
                    let controller = shell.pet_history(&pet_id);
                    if let Some(records) =
                        show(&shell, controller, &pets::history_columns(), paging.index()).await
                    {
                        println!("\n{}", pets::history_title(&records));
                        for record in &records {
                            println!();
                            for (label, value) in pets::record_details(record) {
                                println!("  {label}: {value}");
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn pages_are_typed_and_one_based() {
            let cli = Cli::try_parse_from(["purplepaw", "clients", "ana", "--page", "3"]).unwrap();
            assert_eq!(
                cli.command,
                Command::Clients {
                    search: Some("ana".to_string()),
                    paging: Paging { page: Some(3) },
                }
            );
            assert_eq!(Paging { page: Some(3) }.index(), 2);
            assert_eq!(Paging::default().index(), 0);

            assert!(Cli::try_parse_from(["purplepaw", "users", "--page", "0"]).is_err());
            assert!(Cli::try_parse_from(["purplepaw", "users", "--page", "two"]).is_err());
        }

        #[test]
        fn appointments_date_and_login_arguments() {
            let cli = Cli::try_parse_from(["purplepaw", "appointments", "2024-05-02"]).unwrap();
            assert_eq!(
                cli.command,
                Command::Appointments {
                    date: NaiveDate::from_ymd_opt(2024, 5, 2),
                    paging: Paging::default(),
                }
            );
            assert!(Cli::try_parse_from(["purplepaw", "appointments", "05/02/2024"]).is_err());
            assert!(Cli::try_parse_from(["purplepaw", "login", "vet@purplepaw.test"]).is_err());

            let cli = Cli::try_parse_from(["purplepaw", "history", "42", "--api-url", "http://x/api"])
                .unwrap();
            assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
            assert!(matches!(cli.command, Command::History { ref pet_id, .. } if pet_id == "42"));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    cli::run(cli::Cli::parse()).await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
