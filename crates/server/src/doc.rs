use crate::routes::{
    auth, catalog, course, department, enrollment, health, module, root, student, user,
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::login,
        department::list_departments,
        department::get_department,
        department::create_department,
        department::update_department,
        department::delete_department,
        course::list_courses,
        course::get_course,
        course::create_course,
        course::update_course,
        course::delete_course,
        module::list_modules,
        module::get_module,
        module::create_module,
        module::update_module,
        module::delete_module,
        catalog::get_catalog,
        student::list_students,
        student::get_student,
        student::create_student,
        student::update_student,
        student::delete_student,
        user::list_users,
        user::get_user,
        user::create_user,
        user::update_user,
        enrollment::list_enrollments,
        enrollment::enroll,
        enrollment::drop_enrollment
    ),
    tags(
        (name = "Health", description = "Liveness probes"),
        (name = "Authentication", description = "Credential verification"),
        (name = "Departments", description = "Department management"),
        (name = "Courses", description = "Course management"),
        (name = "Modules", description = "Module management"),
        (name = "Catalog", description = "Grouped catalog view"),
        (name = "Students", description = "Student records"),
        (name = "Users", description = "User accounts"),
        (name = "Enrollments", description = "Course enrollment"),
    ),
    info(
        title = "Student Records API",
        version = "1.0.0",
        description = "Student records and course catalog API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
