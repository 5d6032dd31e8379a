use actix_web::{web, App, HttpResponse, HttpServer};
use actix_cors::Cors;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use chrono::Duration;
use log::info;
use std::env;

use token_economics_calculator::config::ServerConfig;
use token_economics_calculator::models::{Outcome, Scenario, ScenarioField};
use token_economics_calculator::routes;
use token_economics_calculator::services::SessionService;
use token_economics_calculator::utils::format::render_report;
use token_economics_calculator::utils::TokenomicsCalculator;

#[derive(Parser)]
#[command(name = "token-economics-calculator", version, about = "Token economics calculator for ICO/presale planning")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Print the token distribution, funds split and FDVs for a scenario
    Compute {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Check whether moving one slider from the given scenario would be accepted
    Validate {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// team_pct, public_pct or funds_to_raise
        #[arg(long)]
        field: ScenarioField,
        #[arg(long)]
        value: f64,
    },
}

#[derive(Args)]
struct ScenarioArgs {
    /// Team token allocation (%)
    #[arg(long, default_value_t = 10.0)]
    team: f64,
    /// Public sale token allocation (%)
    #[arg(long, default_value_t = 80.0)]
    public: f64,
    /// Funds to raise ($)
    #[arg(long, default_value_t = 100_000.0)]
    funds: f64,
}

impl From<&ScenarioArgs> for Scenario {
    fn from(args: &ScenarioArgs) -> Self {
        Scenario::new(args.team, args.public, args.funds)
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(log_level));

    match cli.command.unwrap_or(Command::Serve) {
        // Only the server needs host/port settings
        Command::Serve => serve(ServerConfig::load()?).await,
        Command::Compute { scenario, json } => run_compute(&Scenario::from(&scenario), json),
        Command::Validate { scenario, field, value } => run_validate(&Scenario::from(&scenario), field, value),
    }
}

async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.log_summary();

    let calculator = web::Data::new(TokenomicsCalculator::new());
    let session_service = web::Data::new(SessionService::with_ttl(Duration::seconds(
        config.session_ttl_secs as i64,
    )));
    let cors_max_age = config.cors_max_age;

    info!("Starting server at http://{}", config.bind_address());

    HttpServer::new(move || {
        // The slider UI is served from elsewhere
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(cors_max_age);

        App::new()
            .wrap(cors)
            .app_data(calculator.clone())
            .app_data(session_service.clone())
            .configure(routes::configure)
            .route("/health", web::get().to(|| async {
                info!("Health check");
                HttpResponse::Ok().body("OK")
            }))
    })
    .bind(config.bind_address())?
    .run()
    .await?;

    info!("Server shutting down");
    Ok(())
}

fn run_compute(scenario: &Scenario, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let calculator = TokenomicsCalculator::new();
    let derived = calculator.compute(scenario.team_pct, scenario.public_pct, scenario.funds_to_raise)?;
    let warning = calculator.limit_warning(scenario);

    if json {
        let body = serde_json::json!({
            "scenario": scenario,
            "derived": derived,
            "meets_fdv_floor": derived.meets_fdv_floor(),
            "warning": warning,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", render_report(scenario, &derived, warning));
        if !derived.meets_fdv_floor() {
            println!("\nInvalid Allocation: LP FDV would drop below ICO FDV");
        }
    }

    Ok(())
}

fn run_validate(current: &Scenario, field: ScenarioField, value: f64) -> Result<(), Box<dyn std::error::Error>> {
    let calculator = TokenomicsCalculator::new();

    if let Err(e) = calculator.validate(current) {
        eprintln!("Current scenario is not valid: {}", e);
        std::process::exit(1);
    }

    match calculator.validate_change(current, field, value) {
        Outcome::Accepted(scenario) => {
            println!(
                "Accepted: team {}%, public {}%, LP {}%, funds ${}",
                scenario.team_pct,
                scenario.public_pct,
                scenario.lp_pct(),
                scenario.funds_to_raise
            );
            Ok(())
        }
        Outcome::Rejected(e) => {
            println!("Rejected ({}): {}", e.reason().code(), e);
            std::process::exit(1);
        }
    }
}
