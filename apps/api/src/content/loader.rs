//! Reads the portfolio's content files and turns them into typed models.
//!
//! Files are re-read on every call so edits show up without a restart.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::content::frontmatter;
use crate::content::ContentError;
use crate::models::portfolio::{Profile, Project};
use crate::models::resume::{Education, Experience, PersonalInfo, ResumeDocument, Skill};

pub const CV_FILE: &str = "cv.md";
pub const PERSONAL_INFO_FILE: &str = "personal-info.md";
pub const PROJECTS_FILE: &str = "projects.md";

#[derive(Debug, Deserialize)]
struct CvFrontMatter {
    #[serde(default)]
    experiences: Vec<Experience>,
    #[serde(default)]
    education: Vec<Education>,
    #[serde(default)]
    skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
struct ProjectsFrontMatter {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Read-only view over the content directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ContentStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads `personal-info.md`. A missing `summary` falls back to the markdown body.
    pub async fn load_profile(&self) -> Result<Profile, ContentError> {
        let raw = self.read(PERSONAL_INFO_FILE).await?;
        let fm = frontmatter::split(&raw, PERSONAL_INFO_FILE)?;
        let mut profile: Profile = fm.decode(PERSONAL_INFO_FILE)?;

        let body = fm.body.trim();
        if profile.summary.is_none() && !body.is_empty() {
            profile.summary = Some(body.to_string());
        }
        Ok(profile)
    }

    pub async fn load_projects(&self) -> Result<Vec<Project>, ContentError> {
        let raw = self.read(PROJECTS_FILE).await?;
        let fm = frontmatter::split(&raw, PROJECTS_FILE)?;
        let parsed: ProjectsFrontMatter = fm.decode(PROJECTS_FILE)?;
        Ok(parsed.projects)
    }

    /// Assembles the layout input from `cv.md` and `personal-info.md` and
    /// validates it, so callers only ever see a well-formed document.
    pub async fn load_resume(&self) -> Result<ResumeDocument, ContentError> {
        let profile = self.load_profile().await?;
        let raw = self.read(CV_FILE).await?;
        let cv: CvFrontMatter = frontmatter::split(&raw, CV_FILE)?.decode(CV_FILE)?;

        let document = ResumeDocument {
            personal_info: PersonalInfo {
                name: profile.name,
                role: profile.role,
            },
            experiences: cv.experiences,
            education: cv.education,
            skills: cv.skills,
        };
        document.validate()?;

        debug!(
            experiences = document.experiences.len(),
            education = document.education.len(),
            skills = document.skills.len(),
            "Loaded résumé content"
        );
        Ok(document)
    }

    async fn read(&self, file: &str) -> Result<String, ContentError> {
        let path = self.dir.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ContentError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(ContentError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutError;

    const PERSONAL_INFO: &str = r#"+++
name = "Jane Doe"
role = "Systems Engineer"
email = "jane@example.com"

[[social_links]]
label = "GitHub"
url = "https://github.com/janedoe"
+++

Builds reliable backends.
"#;

    const CV: &str = r#"+++
skills = [{ name = "Rust" }, { name = "SQL" }, { name = "Docker" }]

[[experiences]]
title = "Senior Developer"
company = "Tech Co."
period = "2018 - Present"
location = "Berlin"
description = "Led development of multiple high-impact projects."

[[experiences]]
title = "Developer"
company = "StartUp Inc."
period = "2015 - 2018"
description = "Developed and maintained web applications."

[[education]]
degree = "MSc in Computer Science"
institution = "University of Technology"
year = "2015"
+++
"#;

    const PROJECTS: &str = r#"+++
[[projects]]
title = "Layout engine"
description = "Paginates résumés."
link = "https://example.com/layout"
+++
"#;

    fn write_content(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_load_resume_merges_profile_and_cv() {
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO), (CV_FILE, CV)]);
        let store = ContentStore::new(dir.path());
        let doc = store.load_resume().await.unwrap();

        assert_eq!(doc.personal_info.name, "Jane Doe");
        assert_eq!(doc.personal_info.role, "Systems Engineer");
        assert_eq!(doc.experiences.len(), 2);
        assert_eq!(doc.experiences[0].location, "Berlin");
        assert_eq!(doc.experiences[1].location, "");
        assert_eq!(doc.education[0].year, "2015");
        let skills: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skills, vec!["Rust", "SQL", "Docker"]);
    }

    #[tokio::test]
    async fn test_bundled_content_loads_and_validates() {
        let store = ContentStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/content"));
        let doc = store.load_resume().await.unwrap();
        assert_eq!(doc.personal_info.name, "John Doe");
        assert_eq!(doc.skills.len(), 7);
        assert!(!store.load_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_profile_uses_body_as_summary() {
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO)]);
        let profile = ContentStore::new(dir.path()).load_profile().await.unwrap();
        assert_eq!(profile.summary.as_deref(), Some("Builds reliable backends."));
        assert_eq!(profile.social_links.len(), 1);
        assert_eq!(profile.email.as_deref(), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn test_load_projects() {
        let dir = write_content(&[(PROJECTS_FILE, PROJECTS)]);
        let projects = ContentStore::new(dir.path()).load_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Layout engine");
        assert!(projects[0].image.is_none());
    }

    #[tokio::test]
    async fn test_missing_cv_is_not_found() {
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO)]);
        let err = ContentStore::new(dir.path()).load_resume().await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(p) if p.ends_with("cv.md")));
    }

    #[tokio::test]
    async fn test_cv_without_sections_is_valid() {
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO), (CV_FILE, "+++\n+++\n")]);
        let doc = ContentStore::new(dir.path()).load_resume().await.unwrap();
        assert!(doc.experiences.is_empty() && doc.education.is_empty() && doc.skills.is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_field_is_toml_error() {
        let cv = "+++\n[[education]]\ndegree = \"BSc\"\nyear = \"2010\"\n+++\n";
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO), (CV_FILE, cv)]);
        let err = ContentStore::new(dir.path()).load_resume().await.unwrap_err();
        assert!(matches!(err, ContentError::Toml { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_experience_without_description_is_toml_error() {
        let cv = "+++\n[[experiences]]\ntitle = \"Dev\"\ncompany = \"Acme\"\nperiod = \"2020\"\n+++\n";
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO), (CV_FILE, cv)]);
        let err = ContentStore::new(dir.path()).load_resume().await.unwrap_err();
        assert!(
            matches!(err, ContentError::Toml { ref file, .. } if file == CV_FILE),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_experience_with_empty_description_is_valid() {
        let cv = "+++\n[[experiences]]\ntitle = \"Dev\"\ncompany = \"Acme\"\nperiod = \"2020\"\ndescription = \"\"\n+++\n";
        let dir = write_content(&[(PERSONAL_INFO_FILE, PERSONAL_INFO), (CV_FILE, cv)]);
        let doc = ContentStore::new(dir.path()).load_resume().await.unwrap();
        assert_eq!(doc.experiences[0].description, "");
    }

    #[tokio::test]
    async fn test_blank_required_field_is_malformed() {
        let info = "+++\nname = \"Jane\"\nrole = \"  \"\n+++\n";
        let dir = write_content(&[(PERSONAL_INFO_FILE, info), (CV_FILE, "+++\n+++\n")]);
        let err = ContentStore::new(dir.path()).load_resume().await.unwrap_err();
        assert!(matches!(
            err,
            ContentError::Malformed(LayoutError::MalformedInput { ref field }) if field == "personal_info.role"
        ));
    }
}
