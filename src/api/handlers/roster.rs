//! Class roster handlers: CRUD, membership edits and custom statuses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::api::dto::{
    AddCustomStatusRequest, AddCustomStatusResponse, AddFacultyRequest, AddStudentRequest,
    ClassDto, ClassmateDto, CreateClassRequest, CustomStatusesResponse, StudentQuery,
    StudentsListResponse, UserQuery,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /classes`: List all classes.
///
/// # Errors
///
/// Returns [`GatewayError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/classes",
    tag = "Classes",
    summary = "List classes",
    responses(
        (status = 200, description = "All classes", body = Vec<ClassDto>),
    )
)]
pub async fn list_classes(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let classes = state.roster_service.list_classes().await?;
    Ok(Json(classes.into_iter().map(ClassDto::from).collect::<Vec<_>>()))
}

/// `POST /classes`: Create a class.
///
/// # Errors
///
/// Returns [`GatewayError::MissingField`] on blank names.
#[utoipa::path(
    post,
    path = "/api/v1/classes",
    tag = "Classes",
    summary = "Create a class",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = ClassDto),
        (status = 400, description = "Missing className or facultyName", body = ErrorResponse),
    )
)]
pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state
        .roster_service
        .create_class(&req.class_name, &req.faculty_name)
        .await?;
    Ok((StatusCode::CREATED, Json(ClassDto::from(class))))
}

/// `GET /classes/{classId}`: Class details.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] if the class does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/classes/{class_id}",
    tag = "Classes",
    summary = "Get class details",
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = ClassDto),
        (status = 404, description = "Class not found", body = ErrorResponse),
    )
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state.roster_service.get_class(&class_id).await?;
    Ok(Json(ClassDto::from(class)))
}

/// `DELETE /classes/{classId}`: Remove a class.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] if the class does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/classes/{class_id}",
    tag = "Classes",
    summary = "Delete a class",
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Class not found", body = ErrorResponse),
    )
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    state.roster_service.delete_class(&class_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /classes/{classId}/students`: Enrolled students.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] if the class does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/classes/{class_id}/students",
    tag = "Classes",
    summary = "List enrolled students",
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Student names", body = StudentsListResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state.roster_service.get_class(&class_id).await?;
    Ok(Json(StudentsListResponse {
        students_list: class.students_list,
    }))
}

/// `POST /classes/{classId}/students`: Enroll a student.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] or a validation error.
#[utoipa::path(
    post,
    path = "/api/v1/classes/{class_id}/students",
    tag = "Classes",
    summary = "Enroll a student",
    params(("class_id" = String, Path, description = "Class ID")),
    request_body = AddStudentRequest,
    responses(
        (status = 200, description = "Updated class", body = ClassDto),
        (status = 404, description = "Class not found", body = ErrorResponse),
    )
)]
pub async fn add_student(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(req): Json<AddStudentRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state
        .roster_service
        .add_student(&class_id, &req.student)
        .await?;
    Ok(Json(ClassDto::from(class)))
}

/// `DELETE /classes/{classId}/students/{student}`: Unenroll a student.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] or
/// [`GatewayError::StudentNotEnrolled`].
#[utoipa::path(
    delete,
    path = "/api/v1/classes/{class_id}/students/{student}",
    tag = "Classes",
    summary = "Unenroll a student",
    params(
        ("class_id" = String, Path, description = "Class ID"),
        ("student" = String, Path, description = "Student name"),
    ),
    responses(
        (status = 200, description = "Updated class", body = ClassDto),
        (status = 404, description = "Class or student not found", body = ErrorResponse),
    )
)]
pub async fn remove_student(
    State(state): State<AppState>,
    Path((class_id, student)): Path<(String, String)>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state
        .roster_service
        .remove_student(&class_id, &student)
        .await?;
    Ok(Json(ClassDto::from(class)))
}

/// `POST /classes/{classId}/faculty`: Assign a faculty member.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] or a validation error.
#[utoipa::path(
    post,
    path = "/api/v1/classes/{class_id}/faculty",
    tag = "Classes",
    summary = "Assign a faculty member",
    params(("class_id" = String, Path, description = "Class ID")),
    request_body = AddFacultyRequest,
    responses(
        (status = 200, description = "Updated class", body = ClassDto),
        (status = 404, description = "Class not found", body = ErrorResponse),
    )
)]
pub async fn add_faculty(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(req): Json<AddFacultyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state
        .roster_service
        .add_faculty(&class_id, &req.faculty)
        .await?;
    Ok(Json(ClassDto::from(class)))
}

/// `DELETE /classes/{classId}/faculty/{faculty}`: Unassign a faculty member.
///
/// # Errors
///
/// Returns [`GatewayError::ClassNotFound`] or
/// [`GatewayError::FacultyNotAssigned`].
#[utoipa::path(
    delete,
    path = "/api/v1/classes/{class_id}/faculty/{faculty}",
    tag = "Classes",
    summary = "Unassign a faculty member",
    params(
        ("class_id" = String, Path, description = "Class ID"),
        ("faculty" = String, Path, description = "Faculty name"),
    ),
    responses(
        (status = 200, description = "Updated class", body = ClassDto),
        (status = 404, description = "Class or faculty not found", body = ErrorResponse),
    )
)]
pub async fn remove_faculty(
    State(state): State<AppState>,
    Path((class_id, faculty)): Path<(String, String)>,
) -> Result<impl IntoResponse, GatewayError> {
    let class = state
        .roster_service
        .remove_faculty(&class_id, &faculty)
        .await?;
    Ok(Json(ClassDto::from(class)))
}

/// `POST /faculty/custom-statuses`: Offer a status in a faculty member's
/// classes.
///
/// # Errors
///
/// Returns [`GatewayError::NoClassesForFaculty`] or a validation error.
#[utoipa::path(
    post,
    path = "/api/v1/faculty/custom-statuses",
    tag = "Custom statuses",
    summary = "Add a custom status",
    request_body = AddCustomStatusRequest,
    responses(
        (status = 200, description = "Status added", body = AddCustomStatusResponse),
        (status = 400, description = "Missing facultyName or status", body = ErrorResponse),
        (status = 404, description = "Faculty teaches no class", body = ErrorResponse),
    )
)]
pub async fn add_custom_status(
    State(state): State<AppState>,
    Json(req): Json<AddCustomStatusRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let classes = state
        .roster_service
        .add_custom_status(&req.faculty_name, &req.status)
        .await?;
    Ok(Json(AddCustomStatusResponse {
        message: "Status updated successfully".to_string(),
        class_ids: classes.into_iter().map(|c| c.class_id).collect(),
    }))
}

/// `GET /students/custom-statuses?studentName=`: Statuses a student may
/// pick.
///
/// # Errors
///
/// Returns [`GatewayError::StudentNotEnrolled`] or a validation error.
#[utoipa::path(
    get,
    path = "/api/v1/students/custom-statuses",
    tag = "Custom statuses",
    summary = "Custom statuses for a student",
    params(StudentQuery),
    responses(
        (status = 200, description = "Status labels", body = CustomStatusesResponse),
        (status = 404, description = "Student is in no class", body = ErrorResponse),
    )
)]
pub async fn student_custom_statuses(
    State(state): State<AppState>,
    Query(query): Query<StudentQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let custom_statuses = state
        .roster_service
        .custom_statuses_for_student(&query.student_name)
        .await?;
    Ok(Json(CustomStatusesResponse { custom_statuses }))
}

/// `GET /users/classmates?userName=`: Students sharing a class with the
/// user, for the peer picker of the check-in form.
///
/// # Errors
///
/// Returns [`GatewayError::NoClassesForUser`] or a validation error.
#[utoipa::path(
    get,
    path = "/api/v1/users/classmates",
    tag = "Classes",
    summary = "Classmates of a user",
    params(UserQuery),
    responses(
        (status = 200, description = "Other students of the user's classes", body = Vec<ClassmateDto>),
        (status = 400, description = "userName missing", body = ErrorResponse),
        (status = 404, description = "User is in no class", body = ErrorResponse),
    )
)]
pub async fn classmates(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let names = state.roster_service.classmates(&query.user_name).await?;
    Ok(Json(
        names
            .into_iter()
            .map(|name| ClassmateDto { name })
            .collect::<Vec<_>>(),
    ))
}

/// Roster routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/{class_id}", get(get_class).delete(delete_class))
        .route(
            "/classes/{class_id}/students",
            get(list_students).post(add_student),
        )
        .route(
            "/classes/{class_id}/students/{student}",
            delete(remove_student),
        )
        .route("/classes/{class_id}/faculty", post(add_faculty))
        .route(
            "/classes/{class_id}/faculty/{faculty}",
            delete(remove_faculty),
        )
        .route("/faculty/custom-statuses", post(add_custom_status))
        .route("/students/custom-statuses", get(student_custom_statuses))
        .route("/users/classmates", get(classmates))
}
