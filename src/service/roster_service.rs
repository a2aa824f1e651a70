//! Roster service: class lifecycle, membership edits and custom statuses.

use std::sync::Arc;

use super::required;
use crate::domain::{ClassRoster, FacultyMatch, RosterEdit};
use crate::error::GatewayError;
use crate::persistence::RosterStore;

/// Orchestration layer for roster operations.
///
/// Every mutation is a single [`RosterEdit`] applied atomically by the
/// store.
#[derive(Debug, Clone)]
pub struct RosterService {
    rosters: Arc<dyn RosterStore>,
    faculty_match: FacultyMatch,
}

impl RosterService {
    /// Creates a new `RosterService`.
    #[must_use]
    pub fn new(rosters: Arc<dyn RosterStore>, faculty_match: FacultyMatch) -> Self {
        Self {
            rosters,
            faculty_match,
        }
    }

    /// Returns every class.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StoreError`] on store failure.
    pub async fn list_classes(&self) -> Result<Vec<ClassRoster>, GatewayError> {
        self.rosters.list_classes().await
    }

    /// Creates a class taught by `faculty_name`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingField`] for blank input, or a store
    /// error.
    pub async fn create_class(
        &self,
        class_name: &str,
        faculty_name: &str,
    ) -> Result<ClassRoster, GatewayError> {
        let class_name = required(class_name, "className")?;
        let faculty_name = required(faculty_name, "facultyName")?;

        let roster = ClassRoster::new(class_name, faculty_name);
        self.rosters.insert_class(roster.clone()).await?;
        tracing::info!(class_id = %roster.class_id, faculty = faculty_name, "class created");
        Ok(roster)
    }

    /// Returns one class.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClassNotFound`] if absent.
    pub async fn get_class(&self, class_id: &str) -> Result<ClassRoster, GatewayError> {
        self.rosters
            .get_class(class_id)
            .await?
            .ok_or_else(|| GatewayError::ClassNotFound(class_id.to_string()))
    }

    /// Deletes a class.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClassNotFound`] if absent.
    pub async fn delete_class(&self, class_id: &str) -> Result<(), GatewayError> {
        self.rosters.delete_class(class_id).await?;
        tracing::info!(class_id, "class deleted");
        Ok(())
    }

    /// Applies one membership edit to a class.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClassNotFound`], or the not-enrolled /
    /// not-assigned error of a removal.
    pub async fn edit_class(
        &self,
        class_id: &str,
        edit: RosterEdit,
    ) -> Result<ClassRoster, GatewayError> {
        let roster = self.rosters.update_class(class_id, edit.clone()).await?;
        tracing::info!(class_id, ?edit, "roster updated");
        Ok(roster)
    }

    /// Enrolls `student` (idempotent).
    ///
    /// # Errors
    ///
    /// See [`RosterService::edit_class`].
    pub async fn add_student(
        &self,
        class_id: &str,
        student: &str,
    ) -> Result<ClassRoster, GatewayError> {
        let student = required(student, "student")?;
        self.edit_class(class_id, RosterEdit::AddStudent(student.to_string()))
            .await
    }

    /// Unenrolls `student`.
    ///
    /// # Errors
    ///
    /// See [`RosterService::edit_class`].
    pub async fn remove_student(
        &self,
        class_id: &str,
        student: &str,
    ) -> Result<ClassRoster, GatewayError> {
        let student = required(student, "student")?;
        self.edit_class(class_id, RosterEdit::RemoveStudent(student.to_string()))
            .await
    }

    /// Assigns `faculty` (idempotent).
    ///
    /// # Errors
    ///
    /// See [`RosterService::edit_class`].
    pub async fn add_faculty(
        &self,
        class_id: &str,
        faculty: &str,
    ) -> Result<ClassRoster, GatewayError> {
        let faculty = required(faculty, "faculty")?;
        self.edit_class(class_id, RosterEdit::AddFaculty(faculty.to_string()))
            .await
    }

    /// Unassigns `faculty`.
    ///
    /// # Errors
    ///
    /// See [`RosterService::edit_class`].
    pub async fn remove_faculty(
        &self,
        class_id: &str,
        faculty: &str,
    ) -> Result<ClassRoster, GatewayError> {
        let faculty = required(faculty, "faculty")?;
        self.edit_class(class_id, RosterEdit::RemoveFaculty(faculty.to_string()))
            .await
    }

    /// Offers `status` in every class taught by `faculty_name`.
    ///
    /// Returns the updated classes. Each class is edited in its own atomic
    /// step, so a store failure partway leaves the earlier classes updated.
    /// Adding a status is idempotent: retrying the same call completes the
    /// remaining classes without duplicating the label.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NoClassesForFaculty`] if the faculty member
    /// teaches nothing, or the first store error.
    pub async fn add_custom_status(
        &self,
        faculty_name: &str,
        status: &str,
    ) -> Result<Vec<ClassRoster>, GatewayError> {
        let faculty_name = required(faculty_name, "facultyName")?;
        let status = required(status, "status")?;

        let classes = self
            .rosters
            .classes_for_faculty(faculty_name, self.faculty_match)
            .await?;
        if classes.is_empty() {
            return Err(GatewayError::NoClassesForFaculty(faculty_name.to_string()));
        }

        let mut updated = Vec::with_capacity(classes.len());
        for class in classes {
            let edit = RosterEdit::AddCustomStatus(status.to_string());
            updated.push(self.edit_class(&class.class_id, edit).await?);
        }
        Ok(updated)
    }

    /// Students sharing a class with `user_name`, who may be enrolled or
    /// teach. The caller is excluded; names are de-duplicated and kept in
    /// class order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NoClassesForUser`] if the user is in no
    /// class.
    pub async fn classmates(&self, user_name: &str) -> Result<Vec<String>, GatewayError> {
        let user_name = required(user_name, "userName")?;
        let classes = self.rosters.classes_for_member(user_name).await?;
        if classes.is_empty() {
            return Err(GatewayError::NoClassesForUser(user_name.to_string()));
        }

        let mut names: Vec<String> = Vec::new();
        for student in classes.into_iter().flat_map(|c| c.students_list) {
            if student != user_name && !names.contains(&student) {
                names.push(student);
            }
        }
        Ok(names)
    }

    /// Custom statuses offered to `student_name`, across all their classes,
    /// without duplicates and in class order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::StudentNotEnrolled`] if the student is in no
    /// class.
    pub async fn custom_statuses_for_student(
        &self,
        student_name: &str,
    ) -> Result<Vec<String>, GatewayError> {
        let student_name = required(student_name, "studentName")?;
        let classes = self.rosters.classes_for_student(student_name).await?;
        if classes.is_empty() {
            return Err(GatewayError::StudentNotEnrolled(student_name.to_string()));
        }

        let mut statuses: Vec<String> = Vec::new();
        for status in classes.into_iter().flat_map(|c| c.custom_statuses) {
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
        Ok(statuses)
    }
}
