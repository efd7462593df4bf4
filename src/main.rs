// --- Generador de Horarios sin Choques - Archivo principal ---

use timetable::config::AppConfig;
use timetable::run_server;
use timetable::telemetry::init_telemetry_with_level;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuración inválida: {}", e);
            std::process::exit(2);
        }
    };
    init_telemetry_with_level(&config.log_level);
    tracing::info!("=== Generador de Horarios (API) === http://{}", config.bind);
    run_server(config).await
}
