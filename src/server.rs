use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::algorithm::format_time;
use crate::config::AppConfig;
use crate::error::TimetableError;
use crate::models::{Course, CourseDraft, Day};
use crate::state::Planner;

/// Estado compartido entre workers. El mutex serializa cálculos y mutaciones.
pub type SharedPlanner = web::Data<Mutex<Planner>>;

#[derive(Debug, Deserialize, Serialize)]
pub struct SessionInput {
    pub day: String,
    pub start: String,
    pub end: String,
}

/// Cuerpo de `POST /courses`. Los campos ausentes se validan como vacíos
/// para devolver `MissingField` en lugar de un error de JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct CourseInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub sessions: Vec<SessionInput>,
}

impl CourseInput {
    /// Ingesta de sesiones: día y horas se validan una a una.
    pub fn to_draft(&self) -> Result<CourseDraft, TimetableError> {
        let mut draft = CourseDraft::new(&self.id, &self.name, self.faculty.clone().unwrap_or_default());
        // id y nombre antes que las horas, igual que en `Planner::add_course`
        draft.check_fields()?;
        for s in &self.sessions {
            let day: Day = s.day.parse()?;
            draft.add_session(day, &s.start, &s.end)?;
        }
        Ok(draft)
    }
}

#[derive(Serialize)]
struct SessionDto {
    day: Day,
    start: String,
    end: String,
}

#[derive(Serialize)]
struct CourseDto {
    index: usize,
    id: String,
    name: String,
    faculty: Option<String>,
    sessions: Vec<SessionDto>,
}

fn course_to_dto(index: usize, c: &Course) -> CourseDto {
    CourseDto {
        index,
        id: c.id().to_string(),
        name: c.name().to_string(),
        faculty: c.faculty().map(str::to_string),
        sessions: c
            .sessions()
            .iter()
            .map(|s| SessionDto { day: s.day(), start: format_time(s.start()), end: format_time(s.end()) })
            .collect(),
    }
}

#[derive(Serialize)]
struct ResultEntry {
    rank: usize,
    label: String,
    courses: Vec<usize>,
    course_ids: Vec<String>,
}

fn results_json(planner: &Planner) -> serde_json::Value {
    let labels = planner.result_labels();
    let entries: Vec<ResultEntry> = planner
        .results()
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (set, label))| ResultEntry {
            rank: i + 1,
            label,
            courses: set.members().to_vec(),
            course_ids: set
                .members()
                .iter()
                .filter_map(|&c| planner.courses().get(c).map(|c| c.id().to_string()))
                .collect(),
        })
        .collect();
    json!({
        "conflict_graph": planner.graph(),
        "results_count": entries.len(),
        "results": entries,
        "selected_index": planner.selected_index(),
        "computed_at": planner.computation().map(|c| c.computed_at())
    })
}

pub fn error_response(e: &TimetableError) -> HttpResponse {
    let body = json!({"error": e.kind(), "message": e.to_string()});
    match e {
        TimetableError::CourseIndexOutOfRange { .. }
        | TimetableError::SelectionOutOfRange { .. }
        | TimetableError::RankOutOfRange { .. } => HttpResponse::NotFound().json(body),
        TimetableError::NoResults | TimetableError::DuplicateId(_) => HttpResponse::Conflict().json(body),
        TimetableError::CourseLimitExceeded { .. } => HttpResponse::UnprocessableEntity().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock(state: &SharedPlanner) -> Result<MutexGuard<'_, Planner>, HttpResponse> {
    state.lock().map_err(|e| {
        error!("planner mutex poisoned: {}", e);
        HttpResponse::InternalServerError().json(json!({"error": "Internal", "message": "planner state unavailable"}))
    })
}

/// GET /courses?q=texto
/// Lista los cursos (filtro opcional por id, nombre o facultad), con su índice original.
async fn list_courses_handler(
    state: SharedPlanner,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    let q = query.get("q").map(String::as_str).unwrap_or("");
    let courses: Vec<CourseDto> = planner.filter_courses(q).into_iter().map(|(i, c)| course_to_dto(i, c)).collect();
    HttpResponse::Ok().json(json!({"count": planner.courses().len(), "courses": courses}))
}

/// POST /courses
async fn add_course_handler(state: SharedPlanner, body: web::Json<CourseInput>) -> impl Responder {
    let draft = match body.to_draft() {
        Ok(d) => d,
        Err(e) => return error_response(&e),
    };
    let mut planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    match planner.add_course(&draft) {
        Ok(index) => {
            let course = &planner.courses()[index];
            HttpResponse::Created().json(json!({"status": "ok", "course": course_to_dto(index, course)}))
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /courses/{index}
async fn remove_course_handler(state: SharedPlanner, path: web::Path<usize>) -> impl Responder {
    let mut planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    match planner.remove_course(path.into_inner()) {
        Ok(removed) => HttpResponse::Ok().json(json!({"status": "ok", "removed": removed.id(), "count": planner.courses().len()})),
        Err(e) => error_response(&e),
    }
}

/// DELETE /courses
async fn clear_handler(state: SharedPlanner) -> impl Responder {
    let mut planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    planner.clear();
    HttpResponse::Ok().json(json!({"status": "ok", "count": 0}))
}

/// POST /compute
async fn compute_handler(state: SharedPlanner) -> impl Responder {
    let mut planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    if let Err(e) = planner.compute() {
        return error_response(&e);
    }
    HttpResponse::Ok().json(results_json(&planner))
}

/// GET /results
async fn results_handler(state: SharedPlanner) -> impl Responder {
    let planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    HttpResponse::Ok().json(results_json(&planner))
}

/// POST /select/{index}  (índice base 0)
async fn select_handler(state: SharedPlanner, path: web::Path<usize>) -> impl Responder {
    let mut planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    match planner.select(path.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({"status": "ok", "selected_index": planner.selected_index()})),
        Err(e) => error_response(&e),
    }
}

/// GET /export/{rank}  (rank base 1, como "Timetable N")
async fn export_handler(state: SharedPlanner, path: web::Path<usize>) -> impl Responder {
    let planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    let rank = path.into_inner();
    // rank 0 no existe: usize::MAX siempre cae fuera de rango
    let index = rank.checked_sub(1).unwrap_or(usize::MAX);
    let exported = planner.export(index).map_err(|e| match e {
        TimetableError::SelectionOutOfRange { len, .. } => TimetableError::RankOutOfRange { rank, len },
        other => other,
    });
    match exported {
        Ok((file_name, csv)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", format!("attachment; filename=\"{}\"", file_name)))
            .body(csv),
        Err(e) => error_response(&e),
    }
}

/// GET /graph
/// Instantánea para el visualizador (nodos, aristas clasificadas, resultados y selección).
async fn graph_handler(state: SharedPlanner) -> impl Responder {
    let planner = match lock(&state) { Ok(p) => p, Err(resp) => return resp };
    HttpResponse::Ok().json(planner.graph_view())
}

async fn help_handler() -> impl Responder {
    let example = CourseInput {
        id: "CS101".to_string(),
        name: "Intro to Programming".to_string(),
        faculty: Some("Dr. Ada".to_string()),
        sessions: vec![
            SessionInput { day: "Mon".to_string(), start: "09:00".to_string(), end: "10:30".to_string() },
            SessionInput { day: "Wed".to_string(), start: "09:00".to_string(), end: "10:30".to_string() },
        ],
    };
    let help = json!({
        "description": "API para armar todas las combinaciones maximales de cursos sin choques de horario (máximo 10 cursos).",
        "endpoints": {
            "GET /courses?q=": "lista cursos (filtro opcional)",
            "POST /courses": "agrega un curso (ver 'post_example')",
            "DELETE /courses/{index}": "quita un curso; los índices posteriores se desplazan",
            "DELETE /courses": "vacía la lista",
            "POST /compute": "calcula grafo de conflictos y horarios ordenados",
            "GET /results": "último cálculo",
            "POST /select/{index}": "elige el horario activo (base 0)",
            "GET /export/{rank}": "CSV del horario número rank (base 1)",
            "GET /graph": "datos para el visualizador"
        },
        "post_example": example,
        "days": Day::ALL,
        "note": "Las horas usan formato 24h HH:MM; una sesión que termina cuando otra empieza no choca."
    });
    HttpResponse::Ok().json(help)
}

/// Registra las rutas (reutilizado por `run_server` y por las pruebas).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/courses", web::get().to(list_courses_handler))
        .route("/courses", web::post().to(add_course_handler))
        .route("/courses", web::delete().to(clear_handler))
        .route("/courses/{index}", web::delete().to(remove_course_handler))
        .route("/compute", web::post().to(compute_handler))
        .route("/results", web::get().to(results_handler))
        .route("/select/{index}", web::post().to(select_handler))
        .route("/export/{rank}", web::get().to(export_handler))
        .route("/graph", web::get().to(graph_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let state: SharedPlanner = web::Data::new(Mutex::new(Planner::new()));
    let cors_origin = config.cors_origin.clone();
    info!(bind = %config.bind, cors = ?cors_origin, "starting timetable server");
    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default().allowed_origin(origin).allow_any_method().allow_any_header(),
            None => Cors::permissive(),
        };
        App::new().wrap(cors).app_data(state.clone()).configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
