//! Estado de la aplicación: lista de cursos, último cálculo y selección.
//!
//! Toda mutación de la lista de cursos pasa por `Planner` y descarta el
//! cálculo anterior (grafo, resultados y selección) en el mismo paso, de modo
//! que nunca conviven resultados con una lista para la que no fueron calculados.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::algorithm::{self, ConflictGraph, IndependentSet, MAX_COURSES};
use crate::error::{Result, TimetableError};
use crate::export::{export_csv, export_file_name};
use crate::models::{Course, CourseDraft};
use crate::view::GraphView;

/// Resultado de un cálculo completo sobre una lista de cursos concreta.
#[derive(Debug, Clone)]
pub struct Computation {
    graph: ConflictGraph,
    results: Vec<IndependentSet>,
    selected: usize,
    computed_at: DateTime<Utc>,
}

impl Computation {
    pub fn graph(&self) -> &ConflictGraph { &self.graph }
    pub fn results(&self) -> &[IndependentSet] { &self.results }
    pub fn computed_at(&self) -> DateTime<Utc> { self.computed_at }

    /// Índice seleccionado; `None` si no hay resultados.
    pub fn selected_index(&self) -> Option<usize> {
        if self.results.is_empty() { None } else { Some(self.selected) }
    }

    pub fn selected(&self) -> Option<&IndependentSet> {
        self.results.get(self.selected)
    }
}

/// Estado explícito que posee la capa externa (servidor, CLI, pruebas).
#[derive(Debug, Clone, Default)]
pub struct Planner {
    courses: Vec<Course>,
    computation: Option<Computation>,
}

impl Planner {
    pub fn new() -> Self {
        Planner::default()
    }

    pub fn courses(&self) -> &[Course] { &self.courses }

    pub fn computation(&self) -> Option<&Computation> { self.computation.as_ref() }

    /// Resultados ordenados del último cálculo (vacío si no hay cálculo vigente).
    pub fn results(&self) -> &[IndependentSet] {
        self.computation.as_ref().map(|c| c.results()).unwrap_or(&[])
    }

    pub fn graph(&self) -> Option<&ConflictGraph> {
        self.computation.as_ref().map(|c| c.graph())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.computation.as_ref().and_then(|c| c.selected_index())
    }

    // Única transición de invalidación: grafo, resultados y selección se van juntos.
    fn invalidate(&mut self) {
        if self.computation.take().is_some() {
            debug!("previous computation discarded");
        }
    }

    /// Agrega un curso desde un borrador. Orden de validación: campos
    /// obligatorios, límite de cursos, sesiones, id duplicado. Si falla, nada cambia.
    pub fn add_course(&mut self, draft: &CourseDraft) -> Result<usize> {
        draft.check_fields()?;
        if self.courses.len() >= MAX_COURSES {
            warn!(limit = MAX_COURSES, "course rejected: limit reached");
            return Err(TimetableError::CourseLimitExceeded { limit: MAX_COURSES });
        }
        let course = draft.build()?;
        if self.courses.iter().any(|c| c.id() == draft.trimmed_id()) {
            return Err(TimetableError::DuplicateId(course.id().to_string()));
        }

        let index = self.courses.len();
        info!(index, id = course.id(), sessions = course.sessions().len(), "course added");
        self.courses.push(course);
        self.invalidate();
        Ok(index)
    }

    /// Quita el curso en `index`; los índices posteriores se desplazan.
    pub fn remove_course(&mut self, index: usize) -> Result<Course> {
        if index >= self.courses.len() {
            return Err(TimetableError::CourseIndexOutOfRange { index, len: self.courses.len() });
        }
        let removed = self.courses.remove(index);
        self.invalidate();
        info!(index, id = removed.id(), remaining = self.courses.len(), "course removed");
        Ok(removed)
    }

    /// Vacía cursos, resultados y selección.
    pub fn clear(&mut self) {
        self.courses.clear();
        self.invalidate();
        info!("planner cleared");
    }

    /// Recalcula todo desde la lista actual. Con la lista vacía falla con
    /// `EmptyCourseList` y deja el estado sin cálculo.
    pub fn compute(&mut self) -> Result<&Computation> {
        self.invalidate();
        let (graph, results) = algorithm::compute(&self.courses)?;
        Ok(self.computation.insert(Computation { graph, results, selected: 0, computed_at: Utc::now() }))
    }

    /// Cambia el resultado activo. Fuera de rango se rechaza sin modificar la selección.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let computation = self.computation.as_mut().ok_or(TimetableError::NoResults)?;
        let len = computation.results.len();
        if index >= len {
            return Err(TimetableError::SelectionOutOfRange { index, len });
        }
        computation.selected = index;
        debug!(index, "selection changed");
        Ok(())
    }

    /// Cursos que coinciden con `query`, con su índice original.
    pub fn filter_courses(&self, query: &str) -> Vec<(usize, &Course)> {
        self.courses.iter().enumerate().filter(|(_, c)| c.matches(query)).collect()
    }

    /// Resumen "Timetable N · K Course(s)" de cada resultado.
    pub fn result_labels(&self) -> Vec<String> {
        self.results()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("Timetable {} · {} Course{}", i + 1, s.len(), if s.len() == 1 { "" } else { "s" }))
            .collect()
    }

    /// CSV del resultado en la posición `index` (base 0) junto con su nombre de archivo.
    pub fn export(&self, index: usize) -> Result<(String, String)> {
        let computation = self.computation.as_ref().ok_or(TimetableError::NoResults)?;
        let set = computation
            .results
            .get(index)
            .ok_or(TimetableError::SelectionOutOfRange { index, len: computation.results.len() })?;
        let csv = export_csv(&self.courses, &computation.graph, set);
        info!(rank = index + 1, courses = set.len(), "timetable exported");
        Ok((export_file_name(index + 1), csv))
    }

    /// CSV del resultado seleccionado.
    pub fn export_selected(&self) -> Result<(String, String)> {
        let index = self.selected_index().ok_or(TimetableError::NoResults)?;
        self.export(index)
    }

    /// Instantánea de sólo lectura para el visualizador.
    pub fn graph_view(&self) -> GraphView {
        GraphView::from_planner(self)
    }
}
