//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Translate text-field input into validated domain calls.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Return values are UTF-8 strings with stable meaning.

use coursetrack_core::db::open_db;
use coursetrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Course, CourseDraft, CourseService, RemoveOutcome, SqliteCourseRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const COURSE_DB_FILE_NAME: &str = "coursetrack.sqlite3";
static COURSE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Course row shape returned to the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListItem {
    /// Store-assigned identifier.
    pub id: i64,
    pub number: i64,
    pub department: String,
    pub location: String,
}

/// List response envelope for the reactive list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListResponse {
    /// Courses in descending identifier order (newest first).
    pub items: Vec<CourseListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for add/remove flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected course ID, when one exists.
    pub course_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl CourseActionResponse {
    fn success(message: impl Into<String>, course_id: Option<i64>) -> Self {
        Self {
            ok: true,
            course_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            course_id: None,
            message: message.into(),
        }
    }
}

/// Adds a course from form-field text input.
///
/// Input semantics:
/// - `number_text` comes from a numeric text field; it is trimmed and must
///   parse as a positive integer.
/// - `department` and `location` are trimmed; empty values are rejected.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created course ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn course_add(
    number_text: String,
    department: String,
    location: String,
) -> CourseActionResponse {
    let number = match parse_course_number(&number_text) {
        Ok(number) => number,
        Err(message) => return CourseActionResponse::failure(message),
    };

    let draft = CourseDraft::new(
        number,
        department.trim().to_string(),
        location.trim().to_string(),
    );
    match with_course_service(|service| service.add_course(&draft)) {
        Ok(id) => CourseActionResponse::success("Course added.", Some(id)),
        Err(err) => CourseActionResponse::failure(format!("course_add failed: {err}")),
    }
}

/// Removes the course matching the three fields exactly.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A missing match is reported as `ok=true` with no `course_id`; the
///   operation is a no-op, not an error.
#[flutter_rust_bridge::frb(sync)]
pub fn course_remove(
    number_text: String,
    department: String,
    location: String,
) -> CourseActionResponse {
    let number = match parse_course_number(&number_text) {
        Ok(number) => number,
        Err(message) => return CourseActionResponse::failure(message),
    };

    let department = department.trim().to_string();
    let location = location.trim().to_string();
    match with_course_service(|service| service.remove_course(number, &department, &location)) {
        Ok(RemoveOutcome::Removed(id)) => {
            CourseActionResponse::success("Course removed.", Some(id))
        }
        Ok(RemoveOutcome::NotFound) => {
            CourseActionResponse::success("No matching course.", None)
        }
        Err(err) => CourseActionResponse::failure(format!("course_remove failed: {err}")),
    }
}

/// Lists all courses, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn course_list() -> CourseListResponse {
    match with_course_service(|service| service.list_courses()) {
        Ok(courses) => {
            let items = courses.into_iter().map(to_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No courses yet.".to_string()
            } else {
                format!("{} course(s).", items.len())
            };
            CourseListResponse { items, message }
        }
        Err(err) => CourseListResponse {
            items: Vec::new(),
            message: format!("course_list failed: {err}"),
        },
    }
}

fn parse_course_number(number_text: &str) -> Result<i64, String> {
    let trimmed = number_text.trim();
    if trimmed.is_empty() {
        return Err("course number is required".to_string());
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| format!("course number must be an integer, got `{trimmed}`"))
}

fn resolve_course_db_path() -> PathBuf {
    COURSE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("COURSETRACK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(COURSE_DB_FILE_NAME)
        })
        .clone()
}

fn with_course_service<T>(
    f: impl FnOnce(&CourseService<SqliteCourseRepository<'_>>) -> coursetrack_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_course_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("course DB open failed: {err}"))?;
    let repo = SqliteCourseRepository::try_new(&conn)
        .map_err(|err| format!("course repo init failed: {err}"))?;
    let service = CourseService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn to_list_item(course: Course) -> CourseListItem {
    CourseListItem {
        id: course.id,
        number: course.number,
        department: course.department,
        location: course.location,
    }
}

#[cfg(test)]
mod tests {
    use super::{core_version, course_add, course_list, course_remove, init_logging, ping};
    use coursetrack_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn course_add_rejects_non_numeric_number_text() {
        let response = course_add("abc".to_string(), "CS".to_string(), "Room 1".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("integer"));
    }

    #[test]
    fn course_add_rejects_empty_number_text() {
        let response = course_add("  ".to_string(), "CS".to_string(), "Room 1".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("required"));
    }

    #[test]
    fn course_add_rejects_zero_number() {
        let response = course_add("0".to_string(), "CS".to_string(), "Room 1".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("positive"));
    }

    #[test]
    fn course_add_then_list_keeps_descending_order() {
        let department = unique_token("list-dept");
        let added = course_add("447".to_string(), department.clone(), "Room 1".to_string());
        assert!(added.ok, "{}", added.message);
        let created_id = added.course_id.expect("add should return course_id");

        let listed = course_list();
        assert!(listed.items.iter().any(|item| item.id == created_id));
        let ids = listed.items.iter().map(|item| item.id).collect::<Vec<_>>();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted, "list must be in descending id order");
    }

    #[test]
    fn course_remove_deletes_exact_match_and_is_noop_otherwise() {
        let department = unique_token("remove-dept");
        let added = course_add("1501".to_string(), department.clone(), "Room 2".to_string());
        assert!(added.ok, "{}", added.message);
        let created_id = added.course_id.expect("add should return course_id");

        let miss = course_remove(
            "1501".to_string(),
            department.clone(),
            "Elsewhere".to_string(),
        );
        assert!(miss.ok, "{}", miss.message);
        assert_eq!(miss.course_id, None);

        let hit = course_remove("1501".to_string(), department.clone(), "Room 2".to_string());
        assert!(hit.ok, "{}", hit.message);
        assert_eq!(hit.course_id, Some(created_id));

        let listed = course_list();
        assert!(!listed.items.iter().any(|item| item.id == created_id));
    }

    #[test]
    fn course_add_persists_row_in_sqlite() {
        let department = unique_token("persist-dept");
        let added = course_add("3210".to_string(), department.clone(), "Room 3".to_string());
        assert!(added.ok, "{}", added.message);
        let created_id = added.course_id.expect("add should return course_id");

        let conn = open_db(super::resolve_course_db_path()).expect("open db");
        let (number, stored_department, location): (i64, String, String) = conn
            .query_row(
                "SELECT number, department, location FROM courses WHERE id = ?1",
                [created_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("query course row");
        assert_eq!(number, 3210);
        assert_eq!(stored_department, department);
        assert_eq!(location, "Room 3");
    }

    #[test]
    fn course_add_trims_field_whitespace() {
        let department = unique_token("trim-dept");
        let added = course_add(
            " 2210 ".to_string(),
            format!("  {department}  "),
            "  Annex 2  ".to_string(),
        );
        assert!(added.ok, "{}", added.message);
        let created_id = added.course_id.expect("add should return course_id");

        let listed = course_list();
        let item = listed
            .items
            .iter()
            .find(|item| item.id == created_id)
            .expect("added course should be listed");
        assert_eq!(item.number, 2210);
        assert_eq!(item.department, department);
        assert_eq!(item.location, "Annex 2");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
