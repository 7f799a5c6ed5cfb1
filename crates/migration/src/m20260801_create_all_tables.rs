use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// No foreign-key constraints: referential integrity is checked at the
// application layer, and the department-delete cascade must be able to
// leave modules behind.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::Code).string().not_null())
                    .col(ColumnDef::new(Departments::Description).text())
                    .col(
                        ColumnDef::new(Departments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Departments::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Departments::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Code).string().not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Courses::Duration).small_integer().not_null())
                    .col(ColumnDef::new(Courses::Fee).double().not_null())
                    .col(ColumnDef::new(Courses::StartDate).date().not_null())
                    .col(ColumnDef::new(Courses::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Courses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create modules table
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Modules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Modules::Name).string().not_null())
                    .col(ColumnDef::new(Modules::Code).string().not_null())
                    .col(ColumnDef::new(Modules::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Modules::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Modules::Credits).small_integer().not_null())
                    .col(ColumnDef::new(Modules::Semester).small_integer().not_null())
                    .col(ColumnDef::new(Modules::ExamWeight).double().not_null())
                    .col(
                        ColumnDef::new(Modules::CourseworkWeight)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Modules::PracticalWeight).double().not_null())
                    .col(ColumnDef::new(Modules::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Modules::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create module_prerequisites junction table (many-to-many, self-referential)
        manager
            .create_table(
                Table::create()
                    .table(ModulePrerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModulePrerequisites::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModulePrerequisites::ModuleId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModulePrerequisites::PrerequisiteId)
                            .uuid()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Email).string().not_null())
                    .col(ColumnDef::new(Students::RollNumber).string().not_null())
                    .col(ColumnDef::new(Students::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Students::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Students::Year).small_integer().not_null())
                    .col(ColumnDef::new(Students::Semester).small_integer().not_null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::UserId).uuid())
                    .col(ColumnDef::new(Students::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create enrollments table
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(ColumnDef::new(Enrollments::JoinedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModulePrerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    Code,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Code,
    DepartmentId,
    Duration,
    Fee,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Modules {
    Table,
    Id,
    Name,
    Code,
    CourseId,
    DepartmentId,
    Credits,
    Semester,
    ExamWeight,
    CourseworkWeight,
    PracticalWeight,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ModulePrerequisites {
    Table,
    Id,
    ModuleId,
    PrerequisiteId,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    Name,
    Email,
    RollNumber,
    DepartmentId,
    CourseId,
    Year,
    Semester,
    Status,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    UserId,
    CourseId,
    Status,
    JoinedAt,
}
