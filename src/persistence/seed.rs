use crate::domain::{Task, TaskStatus};

/// (title, description, status, assignee, tags)
const SEED: &[(&str, &str, TaskStatus, &str, &[&str])] = &[
    (
        "Design Homepage Mockup",
        "Wireframes and high-fidelity mockups for the new landing page.",
        TaskStatus::Scheduled,
        "Alice Monroe",
        &["design", "ui"],
    ),
    (
        "Implement Authentication",
        "Login and registration endpoints with input validation.",
        TaskStatus::Scheduled,
        "Brian Chen",
        &["backend", "security"],
    ),
    (
        "Optimize Landing Page Images",
        "Compress and lazy-load images to cut page load time.",
        TaskStatus::InProgress,
        "Emma Johnson",
        &["frontend", "performance"],
    ),
    (
        "Fix Responsive Navbar",
        "Menu overlaps the logo on narrow screens.",
        TaskStatus::InProgress,
        "Emma Johnson",
        &["frontend", "bugfix"],
    ),
    (
        "Set Up CI/CD Pipeline",
        "Run tests on every push and deploy main to staging.",
        TaskStatus::InProgress,
        "Felix Zhang",
        &["devops", "automation"],
    ),
    (
        "User Feedback Survey",
        "Collect feedback from beta users.",
        TaskStatus::Done,
        "Hector Ramirez",
        &["research", "ux"],
    ),
    (
        "Brainstorm New Features",
        "Gather ideas for the next releases.",
        TaskStatus::Backlog,
        "Maya Singh",
        &["planning", "brainstorm"],
    ),
    (
        "Research UI Trends",
        "Survey current design trends to inform UI decisions.",
        TaskStatus::Backlog,
        "Noah Kim",
        &["design", "research"],
    ),
    (
        "Organize Team Workshop",
        "Plan a workshop on team collaboration.",
        TaskStatus::Backlog,
        "Olivia Martinez",
        &["team", "planning"],
    ),
];

/// Starter tasks written on first run
pub fn sample_tasks() -> Vec<Task> {
    SEED.iter()
        .map(|(title, description, status, assignee, tags)| {
            Task::new(title.to_string(), *status)
                .with_description(*description)
                .with_assignee(*assignee)
                .with_tags(tags.iter().copied())
        })
        .collect()
}
