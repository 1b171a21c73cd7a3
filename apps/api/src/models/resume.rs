use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

/// Name and role printed in the résumé header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    /// Older content files omit this; an empty location renders the period alone.
    #[serde(default)]
    pub location: String,
    /// Free text, wrapped to the configured width at layout time. Required,
    /// but may be empty.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

/// The input of one layout pass. Built once per render request from
/// already-parsed content and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl ResumeDocument {
    /// Checks that every required field is present and non-blank.
    ///
    /// Serde already rejects absent keys and wrong shapes when the document is
    /// decoded from front matter; this catches the values that decode fine but
    /// carry nothing to print.
    pub fn validate(&self) -> Result<(), LayoutError> {
        require("personal_info.name", &self.personal_info.name)?;
        require("personal_info.role", &self.personal_info.role)?;

        for (i, exp) in self.experiences.iter().enumerate() {
            require(&format!("experiences[{i}].title"), &exp.title)?;
            require(&format!("experiences[{i}].company"), &exp.company)?;
            require(&format!("experiences[{i}].period"), &exp.period)?;
        }
        for (i, edu) in self.education.iter().enumerate() {
            require(&format!("education[{i}].degree"), &edu.degree)?;
            require(&format!("education[{i}].institution"), &edu.institution)?;
            require(&format!("education[{i}].year"), &edu.year)?;
        }
        for (i, skill) in self.skills.iter().enumerate() {
            require(&format!("skills[{i}].name"), &skill.name)?;
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), LayoutError> {
    if value.trim().is_empty() {
        return Err(LayoutError::MalformedInput {
            field: field.to_string(),
        });
    }
    Ok(())
}
