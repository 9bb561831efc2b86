//! Static mapping between student toggles, generated report fields, and the
//! places they appear in the preview and the exported document.

use serde::Serialize;

use crate::models::report::{ReportContent, ReportField};
use crate::models::student::{Skill, StudentRecord};

/// An early-learning area: its skills and the generated next-steps field.
#[derive(Debug, Clone, Serialize)]
pub struct SkillGroup {
    pub title: &'static str,
    pub next_steps: ReportField,
    pub skills: &'static [Skill],
}

/// A characteristic of effective learning and its bullet prompts.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveLearning {
    pub label: &'static str,
    pub field: ReportField,
    pub bullets: &'static [&'static str],
}

pub const SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        title: "Communication and Language",
        next_steps: ReportField::CommunicationAndLanguageNextSteps,
        skills: &[Skill::ListeningAttentionUnderstanding, Skill::Speaking],
    },
    SkillGroup {
        title: "Physical Development",
        next_steps: ReportField::PhysicalDevelopmentNextSteps,
        skills: &[Skill::GrossMotorSkills, Skill::FineMotorSkills],
    },
    SkillGroup {
        title: "Personal, Social and Emotional Development",
        next_steps: ReportField::PersonalSocialEmotionalDevelopmentNextSteps,
        skills: &[
            Skill::SelfRegulation,
            Skill::ManagingSelf,
            Skill::BuildingRelationships,
        ],
    },
    SkillGroup {
        title: "Literacy",
        next_steps: ReportField::LiteracyNextSteps,
        skills: &[Skill::Comprehension, Skill::WordReading, Skill::Writing],
    },
    SkillGroup {
        title: "Mathematics",
        next_steps: ReportField::MathematicsNextSteps,
        skills: &[Skill::Number, Skill::NumericalPatterns],
    },
    SkillGroup {
        title: "Understanding the World",
        next_steps: ReportField::UnderstandingTheWorldNextSteps,
        skills: &[
            Skill::PastAndPresent,
            Skill::PeopleCultureCommunities,
            Skill::TheNaturalWorld,
        ],
    },
    SkillGroup {
        title: "Expressive Arts and Design",
        next_steps: ReportField::ExpressiveArtsAndDesignNextSteps,
        skills: &[Skill::CreatingWithMaterials, Skill::BeingImaginativeExpressive],
    },
];

pub const EFFECTIVE_LEARNING: &[EffectiveLearning] = &[
    EffectiveLearning {
        label: "Playing and exploring",
        field: ReportField::PlayingAndExploring,
        bullets: &[
            "Finding out and exploring",
            "Playing with what they know",
            "Being willing to \u{2018}have a go\u{2019}",
        ],
    },
    EffectiveLearning {
        label: "Active learning",
        field: ReportField::ActiveLearning,
        bullets: &[
            "Being involved and concentrating",
            "Keeping trying",
            "Enjoying achieving what they set out to do",
        ],
    },
    EffectiveLearning {
        label: "Creating and thinking critically",
        field: ReportField::CreatingAndThinkingCritically,
        bullets: &[
            "Having their own ideas",
            "Making links",
            "Choosing ways to do things",
        ],
    },
];

/// Display title for a generated field.
pub fn field_title(field: ReportField) -> &'static str {
    match field {
        ReportField::PlayingAndExploring => "Playing and Exploring",
        ReportField::ActiveLearning => "Active Learning",
        ReportField::CreatingAndThinkingCritically => "Creating and Thinking Critically",
        ReportField::CommunicationAndLanguageNextSteps => "Communication and Language Next Steps",
        ReportField::PhysicalDevelopmentNextSteps => "Physical Development Next Steps",
        ReportField::PersonalSocialEmotionalDevelopmentNextSteps => {
            "Personal, Social & Emotional Development Next Steps"
        }
        ReportField::LiteracyNextSteps => "Literacy Next Steps",
        ReportField::MathematicsNextSteps => "Mathematics Next Steps",
        ReportField::UnderstandingTheWorldNextSteps => "Understanding the World Next Steps",
        ReportField::ExpressiveArtsAndDesignNextSteps => "Expressive Arts & Design Next Steps",
        ReportField::ReligiousEducationComments => "Religious Education Comments",
        ReportField::GeneralComments => "General Comments",
    }
}

/// One-line description of a field, used in the model's output schema.
pub fn field_description(field: ReportField) -> &'static str {
    match field {
        ReportField::PlayingAndExploring => {
            "How the child finds out and explores, plays with what they know and is willing to have a go."
        }
        ReportField::ActiveLearning => {
            "How the child stays involved and concentrates, keeps trying and enjoys achieving what they set out to do."
        }
        ReportField::CreatingAndThinkingCritically => {
            "How the child has their own ideas, makes links and chooses ways to do things."
        }
        ReportField::CommunicationAndLanguageNextSteps => {
            "Next steps for Communication and Language."
        }
        ReportField::PhysicalDevelopmentNextSteps => "Next steps for Physical Development.",
        ReportField::PersonalSocialEmotionalDevelopmentNextSteps => {
            "Next steps for Personal, Social and Emotional Development."
        }
        ReportField::LiteracyNextSteps => "Next steps for Literacy.",
        ReportField::MathematicsNextSteps => "Next steps for Mathematics.",
        ReportField::UnderstandingTheWorldNextSteps => "Next steps for Understanding the World.",
        ReportField::ExpressiveArtsAndDesignNextSteps => {
            "Next steps for Expressive Arts and Design."
        }
        ReportField::ReligiousEducationComments => {
            "Comments on progress in Religious Education, consistent with the recorded progress band."
        }
        ReportField::GeneralComments => {
            "A warm overall comment on the child's year, drawing on the notes and attendance."
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewSection {
    pub heading: &'static str,
    pub fields: &'static [ReportField],
}

/// How generated fields are grouped when a report is previewed.
pub const PREVIEW_SECTIONS: &[PreviewSection] = &[
    PreviewSection {
        heading: "Effective Learning Goals",
        fields: &[
            ReportField::PlayingAndExploring,
            ReportField::ActiveLearning,
            ReportField::CreatingAndThinkingCritically,
        ],
    },
    PreviewSection {
        heading: "Next Steps",
        fields: &[
            ReportField::CommunicationAndLanguageNextSteps,
            ReportField::PhysicalDevelopmentNextSteps,
            ReportField::PersonalSocialEmotionalDevelopmentNextSteps,
            ReportField::LiteracyNextSteps,
            ReportField::MathematicsNextSteps,
            ReportField::UnderstandingTheWorldNextSteps,
            ReportField::ExpressiveArtsAndDesignNextSteps,
        ],
    },
    PreviewSection {
        heading: "Comments",
        fields: &[
            ReportField::ReligiousEducationComments,
            ReportField::GeneralComments,
        ],
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Resolved values
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SkillValue {
    pub skill: Skill,
    pub label: &'static str,
    pub value: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGroupValues<'a> {
    pub title: &'static str,
    pub next_steps: Option<&'a str>,
    pub skills: Vec<SkillValue>,
}

/// Resolves every group's toggles against a record, attaching next steps when
/// report content is available.
pub fn skill_values<'a>(
    record: &StudentRecord,
    content: Option<&'a ReportContent>,
) -> Vec<SkillGroupValues<'a>> {
    SKILL_GROUPS
        .iter()
        .map(|group| SkillGroupValues {
            title: group.title,
            next_steps: content.map(|c| c.get(group.next_steps)),
            skills: group
                .skills
                .iter()
                .map(|&skill| SkillValue {
                    skill,
                    label: skill.label(),
                    value: record.skills.is_set(skill),
                })
                .collect(),
        })
        .collect()
}

/// Labels of the toggled skills in catalog order, or "None recorded".
pub fn observed_skills(record: &StudentRecord) -> String {
    let observed: Vec<&str> = SKILL_GROUPS
        .iter()
        .flat_map(|g| g.skills.iter())
        .filter(|&&s| record.skills.is_set(s))
        .map(|s| s.label())
        .collect();

    if observed.is_empty() {
        "None recorded".to_string()
    } else {
        observed.join(", ")
    }
}

/// Per-area breakdown of expected and emerging skills, one line per area.
pub fn skill_summary(record: &StudentRecord) -> String {
    skill_values(record, None)
        .iter()
        .map(|group| {
            let pick = |expected: bool| {
                let labels: Vec<&str> = group
                    .skills
                    .iter()
                    .filter(|s| s.value == expected)
                    .map(|s| s.label)
                    .collect();
                if labels.is_empty() {
                    "none".to_string()
                } else {
                    labels.join(", ")
                }
            };
            format!(
                "- {}: Expected: {}. Emerging: {}.",
                group.title,
                pick(true),
                pick(false)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
