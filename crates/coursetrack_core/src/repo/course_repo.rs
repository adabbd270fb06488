//! Course repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `courses` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the course fields before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `list_courses` returns rows in descending identifier order.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::course::{Course, CourseDraft, CourseId, CourseValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const COURSE_SELECT_SQL: &str = "SELECT
    id,
    number,
    department,
    location
FROM courses";

const REQUIRED_COLUMNS: &[&str] = &["id", "number", "department", "location"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for course persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CourseValidationError),
    Db(DbError),
    NotFound(CourseId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "course not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted course data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CourseValidationError> for RepoError {
    fn from(value: CourseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for course CRUD operations.
pub trait CourseRepository {
    /// Inserts a validated draft; the store assigns the identifier.
    fn insert_course(&self, draft: &CourseDraft) -> RepoResult<CourseId>;
    /// Writes a course under its existing identifier, replacing any row
    /// already stored under that key.
    fn upsert_course(&self, course: &Course) -> RepoResult<CourseId>;
    fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>>;
    /// Exact field match, newest row first.
    fn find_course(
        &self,
        number: i64,
        department: &str,
        location: &str,
    ) -> RepoResult<Option<Course>>;
    /// All rows in descending identifier order.
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
    fn delete_course(&self, id: CourseId) -> RepoResult<()>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    /// Wraps a connection after checking its schema preconditions.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is not the
    ///   version this binary migrated to.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `courses`
    ///   shape does not match.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'courses'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable("courses"));
        }

        for column in REQUIRED_COLUMNS {
            let column_exists: i64 = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM pragma_table_info('courses') WHERE name = ?1
                );",
                [column],
                |row| row.get(0),
            )?;
            if column_exists == 0 {
                return Err(RepoError::MissingRequiredColumn {
                    table: "courses",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn insert_course(&self, draft: &CourseDraft) -> RepoResult<CourseId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO courses (number, department, location) VALUES (?1, ?2, ?3);",
            params![draft.number, draft.department.as_str(), draft.location.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn upsert_course(&self, course: &Course) -> RepoResult<CourseId> {
        course.validate()?;

        // ON CONFLICT keeps the original created_at, unlike INSERT OR REPLACE
        // which would drop and re-create the row.
        self.conn.execute(
            "INSERT INTO courses (id, number, department, location)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                number = excluded.number,
                department = excluded.department,
                location = excluded.location;",
            params![
                course.id,
                course.number,
                course.department.as_str(),
                course.location.as_str()
            ],
        )?;

        Ok(course.id)
    }

    fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_course_row(row)?));
        }

        Ok(None)
    }

    fn find_course(
        &self,
        number: i64,
        department: &str,
        location: &str,
    ) -> RepoResult<Option<Course>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COURSE_SELECT_SQL}
             WHERE number = ?1 AND department = ?2 AND location = ?3
             ORDER BY id DESC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![number, department, location])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_course_row(row)?));
        }

        Ok(None)
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} ORDER BY id DESC;"))?;

        let mut rows = stmt.query([])?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next()? {
            courses.push(parse_course_row(row)?);
        }

        Ok(courses)
    }

    fn delete_course(&self, id: CourseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM courses WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_course_row(row: &Row<'_>) -> RepoResult<Course> {
    let course = Course {
        id: row.get("id")?,
        number: row.get("number")?,
        department: row.get("department")?,
        location: row.get("location")?,
    };
    course.validate().map_err(|err| {
        RepoError::InvalidData(format!("course id {} fails validation: {err}", course.id))
    })?;
    Ok(course)
}
