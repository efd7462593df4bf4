// Utilidades compartidas por las pruebas de integración.
#![allow(dead_code)]

use std::collections::BTreeSet;

use timetable::algorithm::ConflictGraph;
use timetable::{CourseDraft, Day, Planner};

/// Borrador con una sola sesión.
pub fn draft(id: &str, name: &str, day: Day, start: &str, end: &str) -> CourseDraft {
    let mut d = CourseDraft::new(id, name, "");
    d.add_session(day, start, end).expect("valid session");
    d
}

/// Planner con los cursos A(Mon 09:00-10:00), B(Mon 09:30-10:30), C(Tue 09:00-10:00).
pub fn abc_planner() -> Planner {
    let mut p = Planner::new();
    p.add_course(&draft("A", "Algebra", Day::Mon, "09:00", "10:00")).unwrap();
    p.add_course(&draft("B", "Biology", Day::Mon, "09:30", "10:30")).unwrap();
    p.add_course(&draft("C", "Chemistry", Day::Tue, "09:00", "10:00")).unwrap();
    p
}

/// Todos los conjuntos independientes maximales por fuerza bruta sobre el conjunto potencia.
pub fn brute_force_mis(graph: &ConflictGraph) -> BTreeSet<Vec<usize>> {
    let n = graph.len();
    let neighbours: Vec<u32> = (0..n).map(|i| graph.conflicts_of(i).fold(0, |m, j| m | (1 << j))).collect();
    let independent = |mask: u32| (0..n).all(|i| mask & (1 << i) == 0 || mask & neighbours[i] == 0);
    let mut out = BTreeSet::new();
    for mask in 0u32..(1u32 << n) {
        if !independent(mask) { continue; }
        let maximal = (0..n).all(|k| mask & (1 << k) != 0 || !independent(mask | (1 << k)));
        if maximal {
            out.insert((0..n).filter(|i| mask & (1 << i) != 0).collect());
        }
    }
    out
}

/// Grafo con `n` vértices cuyas aristas son los bits de `edge_mask` sobre los pares `i < j`.
pub fn graph_from_mask(n: usize, edge_mask: u64) -> ConflictGraph {
    let mut edges = Vec::new();
    let mut bit = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if edge_mask & (1 << bit) != 0 { edges.push((i, j)); }
            bit += 1;
        }
    }
    ConflictGraph::from_edges(n, &edges).expect("valid graph")
}
