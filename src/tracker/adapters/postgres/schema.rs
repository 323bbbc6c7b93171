//! Diesel schema for tracker persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records, owned by a project.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project; deleting the project cascades here.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Assignee email.
        #[max_length = 255]
        assigned_to -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comment records, owned by a task.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task; deleting the task cascades here.
        task_id -> Uuid,
        /// Author email.
        #[max_length = 255]
        author -> Varchar,
        /// Free-text content.
        content -> Text,
        /// Resolved mention emails, frozen at creation.
        tags -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(comments -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(projects, tasks, comments);
