// Biblioteca raíz del crate `timetable`.
// Núcleo de detección de conflictos y enumeración de horarios maximales, más
// el estado de la aplicación, la exportación CSV, la vista del grafo y el
// servidor HTTP que los expone.
pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod view;

pub use algorithm::{ConflictGraph, IndependentSet, MAX_COURSES, compute};
pub use error::{GraphError, Result, TimetableError};
pub use models::{Course, CourseDraft, Day, Session};
pub use state::Planner;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
