diesel::table! {
    users (id) {
        id -> Text,
        name -> Text,
        email -> Text,
        password -> Text,
        avatar_url -> Nullable<Text>,
    }
}

diesel::table! {
    projects (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        creator_id -> Text,
        task_count -> Int4,
        thread_count -> Int4,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        thread_id -> Nullable<Text>,
    }
}

diesel::table! {
    project_members (project_id, user_id) {
        project_id -> Text,
        user_id -> Text,
        role -> Text,
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    project_tasks (id) {
        id -> Text,
        title -> Text,
        description -> Nullable<Text>,
        due_date -> Timestamptz,
        project_id -> Text,
        is_completed -> Bool,
        assigner_id -> Text,
    }
}

diesel::table! {
    project_task_assignees (task_id, user_id) {
        task_id -> Text,
        user_id -> Text,
    }
}

diesel::table! {
    tasks (id) {
        id -> Text,
        title -> Text,
        description -> Nullable<Text>,
        due_date -> Nullable<Date>,
        due_time -> Nullable<Time>,
        is_completed -> Bool,
        #[sql_name = "type"]
        kind -> Text,
        priority -> Nullable<Text>,
        streak -> Int4,
        last_completed -> Nullable<Timestamptz>,
        project_id -> Nullable<Text>,
    }
}

diesel::table! {
    threads (id) {
        id -> Text,
        name -> Text,
        #[sql_name = "type"]
        kind -> Text,
        parent_thread_id -> Nullable<Text>,
        project_id -> Nullable<Text>,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    thread_members (thread_id, user_id) {
        thread_id -> Text,
        user_id -> Text,
        role -> Text,
        custom_role -> Nullable<Text>,
        status -> Text,
        last_active -> Timestamptz,
        role_color -> Nullable<Text>,
    }
}

diesel::table! {
    messages (id) {
        id -> Text,
        thread_id -> Text,
        sender_id -> Text,
        content -> Text,
        #[sql_name = "type"]
        kind -> Text,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
        is_edited -> Bool,
        reply_to_message_id -> Nullable<Text>,
        is_unread -> Bool,
    }
}

diesel::table! {
    message_attachments (id) {
        id -> Text,
        message_id -> Text,
        file_name -> Text,
        file_size -> Int8,
        file_type -> Text,
        url -> Text,
        thumbnail_url -> Nullable<Text>,
        mime_type -> Nullable<Text>,
    }
}

diesel::table! {
    mentions (id) {
        id -> Int4,
        message_id -> Text,
        mention_text -> Text,
        user_id -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    project_members,
    project_tasks,
    project_task_assignees,
    tasks,
    threads,
    thread_members,
    messages,
    message_attachments,
    mentions,
);
