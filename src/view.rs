// Alimentación para el visualizador del grafo de conflictos.
//
// Sólo calcula la disposición circular, la clasificación de aristas y los
// colores; el dibujo lo hace el consumidor.
use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use petgraph::algo::connected_components;
use serde::Serialize;

use crate::algorithm::clique_bk::IndependentSet;
use crate::algorithm::conflict::conflicting_sessions;
use crate::state::Planner;

pub const CANVAS_SIZE: f64 = 400.0;
pub const NODE_RADIUS: f64 = 15.0;
const LAYOUT_PADDING: f64 = 30.0;

/// Paleta fija (acento, fondo); el curso `i` usa `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [(&str, &str); 5] = [
    ("#6C63FF", "#E9E7FF"),
    ("#FF6FA3", "#FFF0F6"),
    ("#00C2A8", "#E6FFFA"),
    ("#FFB86B", "#FFF7EB"),
    ("#8BD3FF", "#F0FBFF"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub accent: &'static str,
    pub background: &'static str,
}

pub fn color_for_index(i: usize) -> Color {
    let (accent, background) = PALETTE[i % PALETTE.len()];
    Color { accent, background }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Posición del nodo `index` de `total` en un círculo, empezando arriba.
pub fn node_position(index: usize, total: usize) -> Point {
    let total = total.max(1) as f64;
    let angle = (index as f64 / total) * 2.0 * PI - PI / 2.0;
    let radius = CANVAS_SIZE / 2.0 - NODE_RADIUS - LAYOUT_PADDING;
    let center = CANVAS_SIZE / 2.0;
    Point { x: center + radius * angle.cos(), y: center + radius * angle.sin() }
}

/// Tipo de arista respecto del horario seleccionado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Un extremo incluido y el otro excluido: el motivo de la exclusión.
    Critical,
    /// Ambos extremos excluidos.
    Minor,
    /// Ambos incluidos; un resultado correcto nunca lo produce.
    Invalid,
}

impl EdgeKind {
    pub fn classify(a_included: bool, b_included: bool) -> Self {
        match (a_included, b_included) {
            (true, true) => EdgeKind::Invalid,
            (false, false) => EdgeKind::Minor,
            _ => EdgeKind::Critical,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub color: Color,
    pub position: Point,
    pub included: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
    /// Pares de sesiones que chocan, p. ej. "Mon 09:00-10:00 / Mon 09:30-10:30".
    pub overlaps: Vec<String>,
}

/// Instantánea de sólo lectura: cursos, grafo, resultados y selección.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub clusters: usize,
    pub results: Vec<IndependentSet>,
    pub selected_index: Option<usize>,
    pub computed_at: Option<DateTime<Utc>>,
}

impl GraphView {
    pub fn from_planner(planner: &Planner) -> Self {
        let courses = planner.courses();
        let n = courses.len();
        let computation = planner.computation();
        let selected = computation.and_then(|c| c.selected());
        let included = |i: usize| selected.is_some_and(|s| s.contains(i));

        let nodes = courses
            .iter()
            .enumerate()
            .map(|(i, c)| NodeView {
                index: i,
                id: c.id().to_string(),
                name: c.name().to_string(),
                color: color_for_index(i),
                position: node_position(i, n),
                included: included(i),
            })
            .collect();

        let (edges, clusters) = match computation {
            Some(c) => {
                let graph = c.graph();
                let edges = graph
                    .edges()
                    .map(|(i, j)| EdgeView {
                        from: i,
                        to: j,
                        kind: EdgeKind::classify(included(i), included(j)),
                        overlaps: conflicting_sessions(&courses[i], &courses[j])
                            .into_iter()
                            .map(|(a, b)| format!("{} / {}", a, b))
                            .collect(),
                    })
                    .collect();
                (edges, connected_components(&graph.to_ungraph()))
            }
            None => (Vec::new(), 0),
        };

        GraphView {
            nodes,
            edges,
            clusters,
            results: planner.results().to_vec(),
            selected_index: planner.selected_index(),
            computed_at: computation.map(|c| c.computed_at()),
        }
    }
}
