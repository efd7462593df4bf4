// Logging: un único layer `fmt` (compacto en debug, JSON en release) filtrado
// por `RUST_LOG` o, si no está definido, por el nivel de la configuración.
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type Salida = Box<dyn Layer<Registry> + Send + Sync>;

fn filtro(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{0},timetable={0}", log_level)))
}

fn salida() -> Salida {
    if cfg!(debug_assertions) {
        fmt::layer().compact().with_target(false).boxed()
    } else {
        fmt::layer().json().with_current_span(true).boxed()
    }
}

/// Instala el subscriber global. Una segunda llamada no reemplaza al primero.
pub fn init_telemetry_with_level(log_level: &str) {
    let instalado = tracing_subscriber::registry().with(salida()).with(filtro(log_level)).try_init();
    if let Err(e) = instalado {
        eprintln!("WARN: logging ya inicializado: {}", e);
    }
}
