use database::{db::create_connection, store::SeaOrmStore};
use importer::{
    ImporterError, import_file,
    util::{DEFAULT_OUTPUT_DIR, save_outcomes, summary_line},
};
use log::{error, info};
use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

const USAGE: &str = "disciplines <file.csv>";

/// Imports the disciplines of a CSV file into the configured database
async fn run() -> Result<bool, ImporterError> {
    let input = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(ImporterError::Usage(USAGE))?;
    let database_url = env::var("DATABASE_URL").map_err(|_| ImporterError::MissingDatabaseUrl)?;

    let db = create_connection(&database_url).await?;
    let store = SeaOrmStore::new(db);

    let report = import_file(&store, &input).await?;
    for outcome in &report.resultados {
        println!("{:<12} {:<8} {}", outcome.codigo, outcome.status, outcome.message);
    }
    println!("{}", summary_line(&report));

    let saved = save_outcomes(Path::new(DEFAULT_OUTPUT_DIR), &input, &report)?;
    info!("Results written to {}", saved.display());

    Ok(report.resumo.erros == 0)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
