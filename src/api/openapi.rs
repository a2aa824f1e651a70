//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    AddCustomStatusRequest, AddCustomStatusResponse, AddFacultyRequest, AddStudentRequest,
    ClassDto, ClassmateDto, CreateClassRequest, CustomStatusesResponse, FacultyQuery,
    StudentsListResponse, SubmitCheckInRequest, SubmitCheckInResponse,
};
use super::handlers::{check_in, roster, status, system};
use crate::domain::StudentSnapshot;
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "checkin-gateway",
        description = "Student check-ins, class rosters and faculty status dashboards."
    ),
    paths(
        status::get_latest_statuses,
        status::post_latest_statuses,
        check_in::submit_check_in,
        roster::list_classes,
        roster::create_class,
        roster::get_class,
        roster::delete_class,
        roster::list_students,
        roster::add_student,
        roster::remove_student,
        roster::add_faculty,
        roster::remove_faculty,
        roster::add_custom_status,
        roster::student_custom_statuses,
        roster::classmates,
        system::health_handler,
    ),
    components(schemas(
        StudentSnapshot,
        FacultyQuery,
        SubmitCheckInRequest,
        SubmitCheckInResponse,
        ClassDto,
        CreateClassRequest,
        AddStudentRequest,
        AddFacultyRequest,
        StudentsListResponse,
        AddCustomStatusRequest,
        AddCustomStatusResponse,
        CustomStatusesResponse,
        ClassmateDto,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    ))
)]
pub struct ApiDoc;
