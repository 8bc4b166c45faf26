mod mapper;
mod merge;
mod requests;
mod types;

pub use mapper::{subject_to_view, task_to_view, SubjectView, TaskView};
pub use merge::{apply_subject_patch, apply_task_patch, toggle_subject, toggle_task};
pub use requests::{NewSubject, NewTask, SubjectPatch, SubjectUpdate, TaskPatch, TaskUpdate};
pub use types::{Day, DayParseError, Subject, Task, TaskRecord};
