// Implementación de Bron–Kerbosch con pivote y bitsets sobre el grafo de
// compatibilidad (complemento del grafo de conflictos). Cada clique maximal del
// grafo de compatibilidad es exactamente un conjunto independiente maximal del
// grafo de conflictos, así que se enumeran todos, no sólo el mayor.
use serde::Serialize;
use tracing::debug;

use crate::algorithm::graph::ConflictGraph;

/// Conjunto de índices de curso sin conflictos entre sí y maximal.
/// Los índices se guardan ordenados de forma ascendente.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IndependentSet(Vec<usize>);

impl IndependentSet {
    pub fn new(mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        members.dedup();
        IndependentSet(members)
    }

    pub fn members(&self) -> &[usize] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn contains(&self, index: usize) -> bool { self.0.binary_search(&index).is_ok() }

    /// Clave canónica: índices ascendentes unidos por coma ("0,2").
    pub fn canonical_key(&self) -> String {
        self.0.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",")
    }
}

type Bitset = Vec<u64>;

#[inline]
fn bitset_empty(words: usize) -> Bitset { vec![0u64; words] }

#[inline]
fn bitset_is_empty(bs: &Bitset) -> bool { bs.iter().all(|w| *w == 0) }

#[inline]
fn bitset_insert(bs: &mut Bitset, i: usize) { bs[i / 64] |= 1u64 << (i % 64); }

#[inline]
fn bitset_remove(bs: &mut Bitset, i: usize) { bs[i / 64] &= !(1u64 << (i % 64)); }

#[inline]
fn bitset_and(a: &Bitset, b: &Bitset) -> Bitset { a.iter().zip(b.iter()).map(|(x, y)| x & y).collect() }

#[inline]
fn bitset_and_not(a: &Bitset, b: &Bitset) -> Bitset { a.iter().zip(b.iter()).map(|(x, y)| x & !y).collect() }

#[inline]
fn bitset_or(a: &Bitset, b: &Bitset) -> Bitset { a.iter().zip(b.iter()).map(|(x, y)| x | y).collect() }

#[inline]
fn bitset_count_and(a: &Bitset, b: &Bitset) -> usize {
    a.iter().zip(b.iter()).map(|(x, y)| (x & y).count_ones() as usize).sum()
}

// Índices con bit 1, en orden ascendente.
fn bits(bs: &Bitset) -> Vec<usize> {
    let mut out = Vec::new();
    for (word_idx, &word) in bs.iter().enumerate() {
        let mut w = word;
        while w != 0 {
            out.push(word_idx * 64 + w.trailing_zeros() as usize);
            w &= w - 1;
        }
    }
    out
}

struct Search<'a> {
    compat: &'a [Bitset],
    found: Vec<IndependentSet>,
    calls: usize,
}

impl Search<'_> {
    // `p` y `x` pertenecen a este marco; las llamadas hijas reciben copias nuevas.
    fn expand(&mut self, r: &mut Vec<usize>, mut p: Bitset, mut x: Bitset) {
        self.calls += 1;
        if bitset_is_empty(&p) && bitset_is_empty(&x) {
            self.found.push(IndependentSet::new(r.clone()));
            return;
        }

        // Pivote: u en P ∪ X con más vecinos compatibles dentro de P; empate -> menor índice.
        let mut pivot: Option<(usize, usize)> = None;
        for u in bits(&bitset_or(&p, &x)) {
            let cnt = bitset_count_and(&self.compat[u], &p);
            if pivot.is_none_or(|(_, best)| cnt > best) { pivot = Some((u, cnt)); }
        }

        let candidates = match pivot {
            Some((u, _)) => bits(&bitset_and_not(&p, &self.compat[u])),
            None => bits(&p),
        };

        for v in candidates {
            let p_new = bitset_and(&p, &self.compat[v]);
            let x_new = bitset_and(&x, &self.compat[v]);
            r.push(v);
            self.expand(r, p_new, x_new);
            r.pop();
            bitset_remove(&mut p, v);
            bitset_insert(&mut x, v);
        }
    }
}

/// Enumera todos los conjuntos independientes maximales del grafo de conflictos.
///
/// El orden de salida es el de la búsqueda (no ordenado); usar
/// `ranker::rank` para obtener el orden de presentación. Un grafo sin vértices
/// produce un único conjunto vacío.
pub fn maximal_independent_sets(graph: &ConflictGraph) -> Vec<IndependentSet> {
    debug_assert!(graph.validate().is_ok(), "conflict graph invariants violated");

    let n = graph.len();
    let words = n.div_ceil(64).max(1);
    let compat: Vec<Bitset> = (0..n)
        .map(|i| {
            let mut bs = bitset_empty(words);
            for j in graph.compatible_with(i) { bitset_insert(&mut bs, j); }
            bs
        })
        .collect();

    let mut p = bitset_empty(words);
    for i in 0..n { bitset_insert(&mut p, i); }

    let mut search = Search { compat: &compat, found: Vec::new(), calls: 0 };
    search.expand(&mut Vec::with_capacity(n), p, bitset_empty(words));

    debug!(vertices = n, calls = search.calls, sets = search.found.len(), "bron-kerbosch finished");
    search.found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut sets: Vec<IndependentSet>) -> Vec<Vec<usize>> {
        sets.sort();
        sets.into_iter().map(|s| s.members().to_vec()).collect()
    }

    #[test]
    fn single_conflict_yields_two_sets() {
        let g = ConflictGraph::from_edges(3, &[(0, 1)]).unwrap();
        assert_eq!(sorted(maximal_independent_sets(&g)), vec![vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn triangle_yields_singletons() {
        let g = ConflictGraph::from_edges(3, &[(0, 1), (0, 2), (1, 2)]).unwrap();
        assert_eq!(sorted(maximal_independent_sets(&g)), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn edgeless_graph_yields_everything() {
        let g = ConflictGraph::from_edges(4, &[]).unwrap();
        assert_eq!(sorted(maximal_independent_sets(&g)), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn empty_graph_yields_the_empty_set() {
        let g = ConflictGraph::from_edges(0, &[]).unwrap();
        let sets = maximal_independent_sets(&g);
        assert_eq!(sets.len(), 1);
        assert!(sets[0].is_empty());
    }

    #[test]
    fn path_of_four() {
        // 0-1-2-3: {0,2}, {0,3}, {1,3}
        let g = ConflictGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(sorted(maximal_independent_sets(&g)), vec![vec![0, 2], vec![0, 3], vec![1, 3]]);
    }

    #[test]
    fn fills_a_whole_bitset_word() {
        // 64 vértices, conflicto sólo entre 0 y 63.
        let g = ConflictGraph::from_adjacency({
            let mut adj = vec![std::collections::BTreeSet::new(); 64];
            adj[0].insert(63);
            adj[63].insert(0);
            adj
        })
        .unwrap();
        let sets = maximal_independent_sets(&g);
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.len() == 63));
    }

    #[test]
    fn canonical_key_is_sorted() {
        let s = IndependentSet::new(vec![2, 0, 10]);
        assert_eq!(s.canonical_key(), "0,2,10");
        assert!(s.contains(10));
        assert!(!s.contains(1));
    }
}
