use chrono::Utc;
use clap::Parser;
use quizforge::db::Db;
use quizforge::fact_api::FactClient;
use quizforge::trivia_api::TriviaClient;
use quizforge::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// libSQL server address, or file:<path> for a local database.
    #[clap(env)]
    url: String,

    /// libSQL authentication token.
    #[arg(long, env, default_value = "")]
    auth_token: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Base URL of the trivia question provider.
    #[arg(long, env, default_value = "https://opentdb.com")]
    trivia_api_url: String,

    /// Base URL of the random-fact provider.
    #[arg(long, env, default_value = "https://api.api-ninjas.com")]
    fact_api_url: String,

    /// API key for the random-fact provider.
    #[arg(long, env, default_value = "")]
    fact_api_key: String,

    /// Mark session cookies Secure (set behind HTTPS).
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,quizforge=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.url, &args.auth_token).await?;
    db.initialize_reset_state(Utc::now()).await?;

    let state = AppState::new(
        db,
        TriviaClient::new(args.trivia_api_url),
        FactClient::new(args.fact_api_url, args.fact_api_key),
        args.secure_cookies,
    );
    let routes = quizforge::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, routes).await?;

    Ok(())
}
