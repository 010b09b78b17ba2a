use crate::schema::{
    mentions, message_attachments, messages, project_members, project_task_assignees,
    project_tasks, projects, tasks, thread_members, threads, users,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// --- User ---

// Full row, only ever loaded for password verification at login.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
}

// What every read endpoint exposes: the password column never leaves the store.
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateUserChangeset {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

// --- Project ---

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub task_count: i32,
    pub thread_count: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub thread_id: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = projects)]
pub struct NewProject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub task_count: i32,
    pub thread_count: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub thread_id: Option<String>,
}

// Full-row overwrite: omitted payload fields are written back as their
// defaults, never preserved.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProjectChangeset {
    pub name: String,
    pub description: Option<String>,
    pub task_count: i32,
    pub thread_count: i32,
    pub status: String,
    pub updated_at: DateTime<Utc>,
    pub thread_id: Option<String>,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectMember {
    pub project_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = project_members)]
pub struct NewProjectMember {
    pub project_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

// Nested shape of one entry in a project's `members` array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectMemberView {
    pub user_id: String,
    pub user: ProjectMemberUser,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectMemberUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

// Single-project GET: the row plus its creator and member fan-out.
#[derive(Serialize, Debug, Clone)]
pub struct ProjectApiResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub task_count: i32,
    pub thread_count: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub thread_id: Option<String>,
    pub creator: Option<PublicUser>,
    pub members: Vec<ProjectMemberView>,
}

impl From<Project> for ProjectApiResponse {
    fn from(project: Project) -> Self {
        ProjectApiResponse {
            id: project.id,
            name: project.name,
            description: project.description,
            creator_id: project.creator_id,
            task_count: project.task_count,
            thread_count: project.thread_count,
            status: project.status,
            created_at: project.created_at,
            updated_at: project.updated_at,
            thread_id: project.thread_id,
            creator: None,
            members: Vec::new(),
        }
    }
}

// --- ProjectTask ---

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = project_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub project_id: String,
    pub is_completed: bool,
    pub assigner_id: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = project_tasks)]
pub struct NewProjectTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub project_id: String,
    pub is_completed: bool,
    pub assigner_id: String,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = project_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProjectTaskChangeset {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub project_id: String,
    pub is_completed: bool,
    pub assigner_id: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = project_task_assignees)]
pub struct NewProjectTaskAssignee {
    pub task_id: String,
    pub user_id: String,
}

// Project-task reads attach a flat id list, not full user objects.
#[derive(Serialize, Debug, Clone)]
pub struct ProjectTaskApiResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub project_id: String,
    pub is_completed: bool,
    pub assigner_id: String,
    pub assignee_ids: Vec<String>,
}

impl From<ProjectTask> for ProjectTaskApiResponse {
    fn from(task: ProjectTask) -> Self {
        ProjectTaskApiResponse {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            project_id: task.project_id,
            is_completed: task.is_completed,
            assigner_id: task.assigner_id,
            assignee_ids: Vec::new(),
        }
    }
}

// --- Task (standalone habit/todo item) ---

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub is_completed: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Option<String>,
    pub streak: i32,
    pub last_completed: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = tasks)]
pub struct NewTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub is_completed: bool,
    pub kind: String,
    pub priority: Option<String>,
    pub streak: i32,
    pub last_completed: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTaskChangeset {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub is_completed: bool,
    pub kind: String,
    pub priority: Option<String>,
    pub streak: i32,
    pub last_completed: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
}

// --- Thread ---

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = threads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Thread {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_thread_id: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = threads)]
pub struct NewThread {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub parent_thread_id: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = threads)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateThreadChangeset {
    pub name: String,
    pub kind: String,
    pub parent_thread_id: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = thread_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ThreadMember {
    pub thread_id: String,
    pub user_id: String,
    pub role: String,
    pub custom_role: Option<String>,
    pub status: String,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = thread_members)]
pub struct NewThreadMember {
    pub thread_id: String,
    pub user_id: String,
    pub role: String,
    pub custom_role: Option<String>,
    pub status: String,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = thread_members)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateThreadMemberChangeset {
    pub role: String,
    pub custom_role: Option<String>,
    pub status: String,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

// Nested shape of one entry in a thread's `members` array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThreadMemberView {
    pub user: PublicUser,
    pub role: String,
    pub status: String,
    pub custom_role: Option<String>,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

impl ThreadMemberView {
    pub fn from_join(member: ThreadMember, user: PublicUser) -> Self {
        ThreadMemberView {
            user,
            role: member.role,
            status: member.status,
            custom_role: member.custom_role,
            last_active: member.last_active,
            role_color: member.role_color,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ThreadApiResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_thread_id: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub members: Vec<ThreadMemberView>,
}

impl From<Thread> for ThreadApiResponse {
    fn from(thread: Thread) -> Self {
        ThreadApiResponse {
            id: thread.id,
            name: thread.name,
            kind: thread.kind,
            parent_thread_id: thread.parent_thread_id,
            project_id: thread.project_id,
            description: thread.description,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
            members: Vec::new(),
        }
    }
}

// --- Message ---

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_edited: bool,
    pub reply_to_message_id: Option<String>,
    pub is_unread: bool,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    pub content: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_edited: bool,
    pub reply_to_message_id: Option<String>,
    pub is_unread: bool,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = messages)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateMessageChangeset {
    pub content: String,
    pub kind: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_edited: bool,
    pub reply_to_message_id: Option<String>,
    pub is_unread: bool,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = message_attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageAttachment {
    pub id: String,
    pub message_id: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = message_attachments)]
pub struct NewMessageAttachment {
    pub id: String,
    pub message_id: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = mentions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Mention {
    pub id: i32,
    pub message_id: String,
    pub mention_text: String,
    pub user_id: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = mentions)]
pub struct NewMention {
    pub message_id: String,
    pub mention_text: String,
    pub user_id: Option<String>,
}

#[derive(AsChangeset, Debug)]
#[diesel(table_name = mentions)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateMentionChangeset {
    pub message_id: String,
    pub mention_text: String,
    pub user_id: Option<String>,
}

// Single-message GET: the row plus sender, attachments and mentions.
#[derive(Serialize, Debug, Clone)]
pub struct MessageApiResponse {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_edited: bool,
    pub reply_to_message_id: Option<String>,
    pub is_unread: bool,
    pub sender: Option<PublicUser>,
    pub attachments: Vec<MessageAttachment>,
    pub mentions: Vec<Mention>,
}

impl From<Message> for MessageApiResponse {
    fn from(message: Message) -> Self {
        MessageApiResponse {
            id: message.id,
            thread_id: message.thread_id,
            sender_id: message.sender_id,
            content: message.content,
            kind: message.kind,
            created_at: message.created_at,
            updated_at: message.updated_at,
            is_edited: message.is_edited,
            reply_to_message_id: message.reply_to_message_id,
            is_unread: message.is_unread,
            sender: None,
            attachments: Vec::new(),
            mentions: Vec::new(),
        }
    }
}

// --- PAYLOAD DTOs ---
//
// Mutation bodies are canonically JSON. Update payloads carry every mutable
// column; omitted optional fields fall back to their defaults on write.

#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateUserPayload {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateUserPayload {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateProjectPayload {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub task_count: Option<i32>,
    pub thread_count: Option<i32>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub thread_id: Option<String>,
    #[serde(default)]
    pub members: Vec<ProjectMemberPayload>,
}

#[derive(Deserialize, Debug)]
pub struct ProjectMemberPayload {
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateProjectPayload {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub task_count: Option<i32>,
    pub thread_count: Option<i32>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub thread_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateProjectTaskPayload {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub project_id: String,
    pub is_completed: Option<bool>,
    pub assigner_id: String,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateProjectTaskPayload {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub project_id: String,
    pub is_completed: Option<bool>,
    pub assigner_id: String,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
}

// The standalone task endpoint is the one camelCase client in the fleet.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub is_completed: Option<bool>,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Option<String>,
    pub streak: Option<i32>,
    pub last_completed: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub is_completed: Option<bool>,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Option<String>,
    pub streak: Option<i32>,
    pub last_completed: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateThreadPayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_thread_id: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<ThreadMemberPayload>,
}

#[derive(Deserialize, Debug)]
pub struct ThreadMemberPayload {
    pub user: UserRef,
    pub role: String,
    pub custom_role: Option<String>,
    pub status: Option<String>,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UserRef {
    pub id: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateThreadPayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_thread_id: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct CreateThreadMemberPayload {
    pub thread_id: String,
    pub user_id: String,
    pub role: Option<String>,
    pub custom_role: Option<String>,
    pub status: Option<String>,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateThreadMemberPayload {
    pub thread_id: String,
    pub user_id: String,
    pub role: Option<String>,
    pub custom_role: Option<String>,
    pub status: Option<String>,
    pub last_active: DateTime<Utc>,
    pub role_color: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ThreadMemberKeyPayload {
    pub thread_id: String,
    pub user_id: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateMessagePayload {
    pub id: String,
    pub thread_id: String,
    pub sender: UserRef,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_edited: Option<bool>,
    pub reply_to_message_id: Option<String>,
    pub is_unread: Option<bool>,
    #[serde(default)]
    pub attachments: Vec<MessageAttachmentPayload>,
    #[serde(default)]
    pub mentions: Vec<MessageMentionPayload>,
}

#[derive(Deserialize, Debug)]
pub struct MessageAttachmentPayload {
    pub id: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MessageMentionPayload {
    pub mention_text: String,
    pub user_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateMessagePayload {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_edited: Option<bool>,
    pub reply_to_message_id: Option<String>,
    pub is_unread: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct CreateMentionPayload {
    pub message_id: String,
    pub mention_text: String,
    pub user_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateMentionPayload {
    pub id: i32,
    pub message_id: String,
    pub mention_text: String,
    pub user_id: Option<String>,
}

// Shared DELETE body for endpoints keyed on a single id.
#[derive(Deserialize, Debug)]
pub struct IdPayload {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_message() -> Message {
        Message {
            id: "msg_1".to_string(),
            thread_id: "thr_1".to_string(),
            sender_id: "user_1".to_string(),
            content: "hello".to_string(),
            kind: "text".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            updated_at: None,
            is_edited: false,
            reply_to_message_id: None,
            is_unread: true,
        }
    }

    #[test]
    fn message_response_serializes_empty_children_as_arrays() {
        let response = MessageApiResponse::from(sample_message());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["attachments"], serde_json::json!([]));
        assert_eq!(value["mentions"], serde_json::json!([]));
        assert!(value["sender"].is_null());
        assert_eq!(value["type"], "text");
    }

    #[test]
    fn thread_member_view_nests_user_fields() {
        let view = ThreadMemberView::from_join(
            ThreadMember {
                thread_id: "thr_1".to_string(),
                user_id: "user_1".to_string(),
                role: "admin".to_string(),
                custom_role: None,
                status: "online".to_string(),
                last_active: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                role_color: Some("#ff0000".to_string()),
            },
            PublicUser {
                id: "user_1".to_string(),
                name: "Alice".to_string(),
                email: "alice@x.com".to_string(),
                avatar_url: None,
            },
        );
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["user"]["id"], "user_1");
        assert_eq!(value["user"]["name"], "Alice");
        assert_eq!(value["user"]["email"], "alice@x.com");
        assert!(value["user"]["avatar_url"].is_null());
        assert_eq!(value["role"], "admin");
        assert_eq!(value["role_color"], "#ff0000");
    }

    #[test]
    fn task_payload_parses_camel_case_keys() {
        let payload: CreateTaskPayload = serde_json::from_str(
            r#"{
                "id": "task_1",
                "title": "Water plants",
                "dueDate": "2024-05-02",
                "dueTime": "08:30:00",
                "isCompleted": true,
                "type": "habit",
                "projectId": "proj_1"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.due_date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(payload.kind, "habit");
        assert_eq!(payload.is_completed, Some(true));
        assert_eq!(payload.project_id.as_deref(), Some("proj_1"));
        // Omitted optionals fall back to defaults, not prior values.
        assert_eq!(payload.priority, None);
        assert_eq!(payload.streak, None);
        assert_eq!(payload.last_completed, None);
    }

    #[test]
    fn task_row_serializes_kind_as_type() {
        let task = Task {
            id: "task_1".to_string(),
            title: "Water plants".to_string(),
            description: None,
            due_date: None,
            due_time: None,
            is_completed: false,
            kind: "habit".to_string(),
            priority: None,
            streak: 0,
            last_completed: None,
            project_id: None,
        };
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["type"], "habit");
        assert!(value.get("kind").is_none());
        assert!(value["priority"].is_null());
    }

    #[test]
    fn message_payload_reads_sender_id_from_nested_object() {
        let payload: CreateMessagePayload = serde_json::from_str(
            r#"{
                "id": "msg_1",
                "thread_id": "thr_1",
                "sender": {"id": "user_1", "name": "Alice"},
                "content": "hello",
                "type": "text",
                "created_at": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.sender.id, "user_1");
        assert!(payload.attachments.is_empty());
        assert!(payload.mentions.is_empty());
        assert_eq!(payload.is_unread, None);
    }

    #[test]
    fn register_payload_defaults_missing_fields_to_empty() {
        let payload: RegisterPayload = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert!(payload.name.is_empty());
        assert_eq!(payload.email, "a@x.com");
        assert!(payload.password.is_empty());
    }

    #[test]
    fn project_task_response_starts_with_empty_assignees() {
        let task = ProjectTask {
            id: "ptask_1".to_string(),
            title: "Design review".to_string(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            project_id: "proj_1".to_string(),
            is_completed: false,
            assigner_id: "user_1".to_string(),
        };
        let value = serde_json::to_value(ProjectTaskApiResponse::from(task)).unwrap();

        assert_eq!(value["assignee_ids"], serde_json::json!([]));
        assert_eq!(value["is_completed"], false);
    }
}
