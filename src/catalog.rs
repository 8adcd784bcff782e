use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCategory {
    All,
    React,
    UiUx,
    OpenSource,
}

/// Filter buttons, in display order.
pub const FILTERS: [ProjectCategory; 4] = [
    ProjectCategory::All,
    ProjectCategory::React,
    ProjectCategory::UiUx,
    ProjectCategory::OpenSource,
];

impl ProjectCategory {
    pub fn label(self) -> &'static str {
        match self {
            ProjectCategory::All => "All",
            ProjectCategory::React => "React",
            ProjectCategory::UiUx => "UI/UX",
            ProjectCategory::OpenSource => "Open Source",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectCategory {
    type Err = anyhow::Error;

    /// Accepts the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FILTERS
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown project category `{s}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub category: ProjectCategory,
    pub tech: &'static [&'static str],
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "E-Commerce Dashboard",
            category: ProjectCategory::React,
            tech: &["React", "Tailwind", "Redux"],
        },
        Project {
            id: 2,
            title: "Fintech Landing Page",
            category: ProjectCategory::UiUx,
            tech: &["Next.js", "Framer Motion"],
        },
        Project {
            id: 3,
            title: "Task Manager CLI",
            category: ProjectCategory::OpenSource,
            tech: &["Node.js", "TypeScript"],
        },
    ]
}

/// Projects shown under `category`, in their original order.
pub fn filter_projects(projects: &[Project], category: ProjectCategory) -> Vec<&Project> {
    projects
        .iter()
        .filter(|p| category == ProjectCategory::All || p.category == category)
        .collect()
}
