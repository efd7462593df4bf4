// Núcleo del generador: tiempo -> conflictos -> grafo -> enumeración -> ranking.
pub mod time;
pub mod conflict;
pub mod graph;
pub mod clique_bk;
pub mod ranker;

pub use clique_bk::{IndependentSet, maximal_independent_sets};
pub use conflict::courses_conflict;
pub use graph::{ConflictGraph, build_conflict_graph};
pub use ranker::rank;
pub use time::{format_time, overlaps, parse_time};

use tracing::info;

use crate::error::{Result, TimetableError};
use crate::models::Course;

/// Límite de cursos en la lista de candidatos.
pub const MAX_COURSES: usize = 10;

/// Cálculo completo y puro: grafo de conflictos y lista de resultados ordenada.
///
/// Falla con `EmptyCourseList` si no hay cursos y con `CourseLimitExceeded`
/// si hay más de `MAX_COURSES`.
pub fn compute(courses: &[Course]) -> Result<(ConflictGraph, Vec<IndependentSet>)> {
    if courses.is_empty() {
        return Err(TimetableError::EmptyCourseList);
    }
    if courses.len() > MAX_COURSES {
        return Err(TimetableError::CourseLimitExceeded { limit: MAX_COURSES });
    }
    let started = std::time::Instant::now();
    let graph = build_conflict_graph(courses);
    let results = rank(maximal_independent_sets(&graph));
    info!(
        courses = courses.len(),
        conflicts = graph.edge_count(),
        results = results.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "timetables computed"
    );
    Ok((graph, results))
}
