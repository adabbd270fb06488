//! Course use-case service.
//!
//! # Responsibility
//! - Provide stable add/remove/list entry points for core callers.
//! - Delegate persistence to repository implementations.
//! - Publish fresh list snapshots to the feed after effective mutations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Removing a course that does not exist is a no-op, not an error.
//! - A mutation that changed nothing publishes nothing.

use crate::feed::CourseFeed;
use crate::model::course::{Course, CourseDraft, CourseId};
use crate::repo::course_repo::{CourseRepository, RepoResult};
use log::info;
use std::sync::Arc;

/// Outcome of an exact-match remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The matching row was deleted.
    Removed(CourseId),
    /// No row matched; nothing changed.
    NotFound,
}

/// Use-case service wrapper for course CRUD operations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
    feed: Option<Arc<CourseFeed>>,
}

impl<R: CourseRepository> CourseService<R> {
    /// Creates a service without a reactive feed attached.
    pub fn new(repo: R) -> Self {
        Self { repo, feed: None }
    }

    /// Creates a service that publishes list snapshots to `feed`.
    pub fn with_feed(repo: R, feed: Arc<CourseFeed>) -> Self {
        Self {
            repo,
            feed: Some(feed),
        }
    }

    /// Adds a validated course draft and returns the store-assigned ID.
    ///
    /// # Contract
    /// - Invalid drafts fail before any SQL runs.
    /// - On success the feed (when attached) receives the fresh list.
    pub fn add_course(&self, draft: &CourseDraft) -> RepoResult<CourseId> {
        let id = self.repo.insert_course(draft)?;
        info!(
            "event=course_add module=service status=ok course_id={id} department={} number={}",
            draft.department, draft.number
        );
        self.publish_snapshot()?;
        Ok(id)
    }

    /// Replaces the row stored under `course.id`, inserting when absent.
    pub fn replace_course(&self, course: &Course) -> RepoResult<CourseId> {
        let id = self.repo.upsert_course(course)?;
        info!("event=course_replace module=service status=ok course_id={id}");
        self.publish_snapshot()?;
        Ok(id)
    }

    /// Removes the course matching (number, department, location) exactly.
    ///
    /// # Contract
    /// - Looks up the newest matching row, then deletes it by ID.
    /// - Returns `RemoveOutcome::NotFound` without error when nothing
    ///   matches; the feed is not notified in that case.
    pub fn remove_course(
        &self,
        number: i64,
        department: &str,
        location: &str,
    ) -> RepoResult<RemoveOutcome> {
        let Some(course) = self.repo.find_course(number, department, location)? else {
            info!(
                "event=course_remove module=service status=noop department={department} number={number}"
            );
            return Ok(RemoveOutcome::NotFound);
        };

        self.repo.delete_course(course.id)?;
        info!(
            "event=course_remove module=service status=ok course_id={} department={department} number={number}",
            course.id
        );
        self.publish_snapshot()?;
        Ok(RemoveOutcome::Removed(course.id))
    }

    /// Gets one course by store-assigned ID.
    pub fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        self.repo.get_course(id)
    }

    /// Lists all courses in descending identifier order.
    pub fn list_courses(&self) -> RepoResult<Vec<Course>> {
        self.repo.list_courses()
    }

    fn publish_snapshot(&self) -> RepoResult<()> {
        if let Some(feed) = &self.feed {
            let courses = self.repo.list_courses()?;
            feed.publish(&courses);
        }
        Ok(())
    }
}
