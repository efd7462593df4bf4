// Orden determinista de los conjuntos enumerados.
use std::cmp::Ordering;

use crate::algorithm::clique_bk::IndependentSet;

/// Orden de presentación: más cursos primero; a igual tamaño, clave canónica
/// ("0,2") ascendente por comparación de cadenas.
pub fn compare(a: &IndependentSet, b: &IndependentSet) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.canonical_key().cmp(&b.canonical_key()))
}

/// Ordena los conjuntos. El resultado no depende del orden de entrada.
pub fn rank(sets: Vec<IndependentSet>) -> Vec<IndependentSet> {
    // precalcular claves para no reconstruir cadenas en cada comparación
    let mut keyed: Vec<(String, IndependentSet)> = sets.into_iter().map(|s| (s.canonical_key(), s)).collect();
    keyed.sort_by(|(ka, a), (kb, b)| b.len().cmp(&a.len()).then_with(|| ka.cmp(kb)));
    keyed.into_iter().map(|(_, s)| s).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(v: &[usize]) -> IndependentSet { IndependentSet::new(v.to_vec()) }

    #[test]
    fn larger_sets_first_then_canonical_key() {
        let ranked = rank(vec![set(&[1, 2]), set(&[3]), set(&[0, 2]), set(&[0, 1, 4])]);
        let keys: Vec<String> = ranked.iter().map(|s| s.canonical_key()).collect();
        assert_eq!(keys, vec!["0,1,4", "0,2", "1,2", "3"]);
    }

    #[test]
    fn ties_use_string_order_not_numeric() {
        // "10" < "9" como cadena
        let ranked = rank(vec![set(&[9]), set(&[10])]);
        assert_eq!(ranked[0].members(), &[10]);
        assert_eq!(compare(&set(&[10]), &set(&[9])), Ordering::Less);
    }

    #[test]
    fn independent_of_input_order() {
        let a = vec![set(&[0]), set(&[2]), set(&[1]), set(&[3, 4])];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(rank(a), rank(b));
    }
}
