// Exportación CSV de un horario seleccionado.
use crate::algorithm::clique_bk::IndependentSet;
use crate::algorithm::graph::ConflictGraph;
use crate::algorithm::time::format_time;
use crate::models::Course;

const SESSIONS_HEADER: &str = "Course ID,Course Name,Faculty,Day,Start,End";
const EXCLUDED_HEADER: &str = "Excluded (Course ID - Course Name),Conflicts With";

/// Entre comillas dobles si contiene coma, comilla o salto de línea; las comillas internas se duplican.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Nombre de archivo para el horario número `rank` (base 1).
pub fn export_file_name(rank: usize) -> String {
    format!("timetable_{}.csv", rank)
}

/// Genera el CSV de `included`:
/// una fila por sesión de cada curso incluido (índice ascendente), una línea en
/// blanco y luego una fila por curso excluido con sus conflictos contra los
/// cursos incluidos ("ID - Nombre", separados por "; ").
pub fn export_csv(courses: &[Course], graph: &ConflictGraph, included: &IndependentSet) -> String {
    let mut csv = String::new();
    csv.push_str(SESSIONS_HEADER);
    csv.push('\n');
    for &i in included.members() {
        let Some(c) = courses.get(i) else { continue };
        for s in c.sessions() {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                csv_escape(c.id()),
                csv_escape(c.name()),
                csv_escape(c.faculty().unwrap_or("")),
                s.day(),
                format_time(s.start()),
                format_time(s.end()),
            ));
        }
    }

    csv.push('\n');
    csv.push_str(EXCLUDED_HEADER);
    csv.push('\n');
    for (i, c) in courses.iter().enumerate() {
        if included.contains(i) { continue; }
        let conflicts: Vec<String> = graph
            .conflicts_of(i)
            .filter(|j| included.contains(*j))
            .filter_map(|j| courses.get(j).map(Course::label))
            .collect();
        csv.push_str(&format!("{},{}\n", csv_escape(&c.label()), csv_escape(&conflicts.join("; "))));
    }
    csv
}
