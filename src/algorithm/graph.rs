// Grafo de conflictos: índice de curso -> conjunto de índices en conflicto.
use std::collections::BTreeSet;

use petgraph::graph::UnGraph;
use serde::Serialize;

use crate::algorithm::conflict::courses_conflict;
use crate::error::GraphError;
use crate::models::Course;

/// Máximo de vértices aceptado por `ConflictGraph::from_adjacency`.
pub const MAX_VERTICES: usize = 64;

/// Grafo no dirigido, simétrico e irreflexivo sobre índices de curso.
///
/// Sólo se obtiene mediante `build_conflict_graph` o `from_adjacency` (que
/// valida), así que el enumerador puede confiar en sus invariantes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictGraph {
    adj: Vec<BTreeSet<usize>>,
}

impl ConflictGraph {
    /// Construye desde listas de adyacencia comprobando rango, simetría e irreflexividad.
    pub fn from_adjacency(adj: Vec<BTreeSet<usize>>) -> Result<Self, GraphError> {
        let graph = ConflictGraph { adj };
        graph.validate()?;
        Ok(graph)
    }

    /// Construye desde una lista de aristas; cada arista se agrega en ambos sentidos.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut adj = vec![BTreeSet::new(); n];
        for &(i, j) in edges {
            if i >= n { return Err(GraphError::VertexOutOfRange { from: j, vertex: i, len: n }); }
            if j >= n { return Err(GraphError::VertexOutOfRange { from: i, vertex: j, len: n }); }
            adj[i].insert(j);
            adj[j].insert(i);
        }
        ConflictGraph::from_adjacency(adj)
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        let n = self.adj.len();
        if n > MAX_VERTICES {
            return Err(GraphError::TooManyVertices { len: n, limit: MAX_VERTICES });
        }
        for (i, set) in self.adj.iter().enumerate() {
            for &j in set {
                if j >= n { return Err(GraphError::VertexOutOfRange { from: i, vertex: j, len: n }); }
                if j == i { return Err(GraphError::SelfLoop(i)); }
                if !self.adj[j].contains(&i) { return Err(GraphError::Asymmetric { from: i, to: j }); }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize { self.adj.len() }

    pub fn is_empty(&self) -> bool { self.adj.is_empty() }

    /// Cursos en conflicto con `i` (vacío si `i` no existe).
    pub fn conflicts_of(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj.get(i).into_iter().flat_map(|s| s.iter().copied())
    }

    pub fn conflicts(&self, i: usize, j: usize) -> bool {
        self.adj.get(i).is_some_and(|s| s.contains(&j))
    }

    /// Número de aristas (cada conflicto cuenta una vez).
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(|s| s.len()).sum::<usize>() / 2
    }

    /// Aristas `(i, j)` con `i < j`, en orden ascendente.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj.iter().enumerate().flat_map(|(i, s)| s.range(i + 1..).map(move |&j| (i, j)))
    }

    /// Conjunto de compatibilidad (grafo complemento) de `i`: `{ j != i : j no está en conflicto con i }`.
    pub fn compatible_with(&self, i: usize) -> BTreeSet<usize> {
        (0..self.len()).filter(|&j| j != i && !self.conflicts(i, j)).collect()
    }

    /// Copia en forma de `petgraph` (peso del nodo = índice del curso).
    pub fn to_ungraph(&self) -> UnGraph<usize, ()> {
        let mut graph = UnGraph::<usize, ()>::with_capacity(self.len(), self.edge_count());
        let nodes: Vec<_> = (0..self.len()).map(|i| graph.add_node(i)).collect();
        for (i, j) in self.edges() {
            graph.add_edge(nodes[i], nodes[j], ());
        }
        graph
    }
}

/// Construye el grafo de conflictos completo probando cada par `i < j`.
pub fn build_conflict_graph(courses: &[Course]) -> ConflictGraph {
    let n = courses.len();
    let mut adj = vec![BTreeSet::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if courses_conflict(&courses[i], &courses[j]) {
                adj[i].insert(j);
                adj[j].insert(i);
            }
        }
    }
    ConflictGraph { adj }
}
