use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// The unique indexes here are the authoritative uniqueness guard; the
// service-layer pre-checks only exist for friendlier error messages.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Natural keys
        manager
            .create_index(
                Index::create()
                    .name("idx_departments_name_unique")
                    .table(Departments::Table)
                    .col(Departments::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_departments_code_unique")
                    .table(Departments::Table)
                    .col(Departments::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_code_unique")
                    .table(Courses::Table)
                    .col(Courses::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_code_unique")
                    .table(Modules::Table)
                    .col(Modules::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_email_unique")
                    .table(Students::Table)
                    .col(Students::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_roll_number_unique")
                    .table(Students::Table)
                    .col(Students::RollNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Nullable column: Postgres allows any number of NULLs here, so
        // only present links are forced unique
        manager
            .create_index(
                Index::create()
                    .name("idx_students_user_id_unique")
                    .table(Students::Table)
                    .col(Students::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email_unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // At most one enrollment row per (user, course) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_user_course_unique")
                    .table(Enrollments::Table)
                    .col(Enrollments::UserId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_module_prerequisites_pair_unique")
                    .table(ModulePrerequisites::Table)
                    .col(ModulePrerequisites::ModuleId)
                    .col(ModulePrerequisites::PrerequisiteId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Lookup indexes for the common reference scans
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_department_id")
                    .table(Courses::Table)
                    .col(Courses::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_modules_course_id")
                    .table(Modules::Table)
                    .col(Modules::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_module_prerequisites_prerequisite_id")
                    .table(ModulePrerequisites::Table)
                    .col(ModulePrerequisites::PrerequisiteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_departments_name_unique")
                    .table(Departments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_departments_code_unique")
                    .table(Departments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_code_unique")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_modules_code_unique")
                    .table(Modules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_students_email_unique")
                    .table(Students::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_students_roll_number_unique")
                    .table(Students::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_students_user_id_unique")
                    .table(Students::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_email_unique")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_user_course_unique")
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_module_prerequisites_pair_unique")
                    .table(ModulePrerequisites::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_department_id")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_modules_course_id")
                    .table(Modules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_module_prerequisites_prerequisite_id")
                    .table(ModulePrerequisites::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Name,
    Code,
}

#[derive(Iden)]
enum Courses {
    Table,
    Code,
    DepartmentId,
}

#[derive(Iden)]
enum Modules {
    Table,
    Code,
    CourseId,
}

#[derive(Iden)]
enum ModulePrerequisites {
    Table,
    ModuleId,
    PrerequisiteId,
}

#[derive(Iden)]
enum Students {
    Table,
    Email,
    RollNumber,
    UserId,
}

#[derive(Iden)]
enum Users {
    Table,
    Email,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    UserId,
    CourseId,
}
