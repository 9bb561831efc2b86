use serde::{Deserialize, Deserializer, Serialize};

/// Placed in a generated field to mean "leave the current text alone".
pub const UNCHANGED_MARKER: &str = "[UNCHANGED]";

fn unchanged_marker() -> String {
    UNCHANGED_MARKER.to_string()
}

/// Reads a section that the model may send as `null`; null becomes the marker.
fn marker_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unchanged_marker))
}

/// Keys of the generated report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportField {
    PlayingAndExploring,
    ActiveLearning,
    CreatingAndThinkingCritically,
    CommunicationAndLanguageNextSteps,
    PhysicalDevelopmentNextSteps,
    PersonalSocialEmotionalDevelopmentNextSteps,
    LiteracyNextSteps,
    MathematicsNextSteps,
    UnderstandingTheWorldNextSteps,
    ExpressiveArtsAndDesignNextSteps,
    ReligiousEducationComments,
    GeneralComments,
}

impl ReportField {
    pub const ALL: [ReportField; 12] = [
        ReportField::PlayingAndExploring,
        ReportField::ActiveLearning,
        ReportField::CreatingAndThinkingCritically,
        ReportField::CommunicationAndLanguageNextSteps,
        ReportField::PhysicalDevelopmentNextSteps,
        ReportField::PersonalSocialEmotionalDevelopmentNextSteps,
        ReportField::LiteracyNextSteps,
        ReportField::MathematicsNextSteps,
        ReportField::UnderstandingTheWorldNextSteps,
        ReportField::ExpressiveArtsAndDesignNextSteps,
        ReportField::ReligiousEducationComments,
        ReportField::GeneralComments,
    ];

    /// The JSON key used on the wire and in the model's output schema.
    pub fn key(self) -> &'static str {
        match self {
            ReportField::PlayingAndExploring => "playingAndExploring",
            ReportField::ActiveLearning => "activeLearning",
            ReportField::CreatingAndThinkingCritically => "creatingAndThinkingCritically",
            ReportField::CommunicationAndLanguageNextSteps => "communicationAndLanguageNextSteps",
            ReportField::PhysicalDevelopmentNextSteps => "physicalDevelopmentNextSteps",
            ReportField::PersonalSocialEmotionalDevelopmentNextSteps => {
                "personalSocialEmotionalDevelopmentNextSteps"
            }
            ReportField::LiteracyNextSteps => "literacyNextSteps",
            ReportField::MathematicsNextSteps => "mathematicsNextSteps",
            ReportField::UnderstandingTheWorldNextSteps => "understandingTheWorldNextSteps",
            ReportField::ExpressiveArtsAndDesignNextSteps => "expressiveArtsAndDesignNextSteps",
            ReportField::ReligiousEducationComments => "religiousEducationComments",
            ReportField::GeneralComments => "generalComments",
        }
    }
}

/// The generated narrative sections of a report.
///
/// Fields the model leaves out or sends as `null` deserialize to [`UNCHANGED_MARKER`];
/// callers decide whether that is acceptable (regeneration) or a failed attempt
/// (full generation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub playing_and_exploring: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub active_learning: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub creating_and_thinking_critically: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub communication_and_language_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub physical_development_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub personal_social_emotional_development_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub literacy_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub mathematics_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub understanding_the_world_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub expressive_arts_and_design_next_steps: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub religious_education_comments: String,
    #[serde(default = "unchanged_marker", deserialize_with = "marker_if_null")]
    pub general_comments: String,
}

impl ReportContent {
    /// A report with every field set to [`UNCHANGED_MARKER`].
    pub fn unchanged() -> Self {
        let mut content = ReportContent::filled("");
        for field in ReportField::ALL {
            content.set(field, unchanged_marker());
        }
        content
    }

    fn filled(text: &str) -> Self {
        ReportContent {
            playing_and_exploring: text.to_string(),
            active_learning: text.to_string(),
            creating_and_thinking_critically: text.to_string(),
            communication_and_language_next_steps: text.to_string(),
            physical_development_next_steps: text.to_string(),
            personal_social_emotional_development_next_steps: text.to_string(),
            literacy_next_steps: text.to_string(),
            mathematics_next_steps: text.to_string(),
            understanding_the_world_next_steps: text.to_string(),
            expressive_arts_and_design_next_steps: text.to_string(),
            religious_education_comments: text.to_string(),
            general_comments: text.to_string(),
        }
    }

    pub fn get(&self, field: ReportField) -> &str {
        match field {
            ReportField::PlayingAndExploring => &self.playing_and_exploring,
            ReportField::ActiveLearning => &self.active_learning,
            ReportField::CreatingAndThinkingCritically => &self.creating_and_thinking_critically,
            ReportField::CommunicationAndLanguageNextSteps => {
                &self.communication_and_language_next_steps
            }
            ReportField::PhysicalDevelopmentNextSteps => &self.physical_development_next_steps,
            ReportField::PersonalSocialEmotionalDevelopmentNextSteps => {
                &self.personal_social_emotional_development_next_steps
            }
            ReportField::LiteracyNextSteps => &self.literacy_next_steps,
            ReportField::MathematicsNextSteps => &self.mathematics_next_steps,
            ReportField::UnderstandingTheWorldNextSteps => &self.understanding_the_world_next_steps,
            ReportField::ExpressiveArtsAndDesignNextSteps => {
                &self.expressive_arts_and_design_next_steps
            }
            ReportField::ReligiousEducationComments => &self.religious_education_comments,
            ReportField::GeneralComments => &self.general_comments,
        }
    }

    pub fn set(&mut self, field: ReportField, text: String) {
        let slot = match field {
            ReportField::PlayingAndExploring => &mut self.playing_and_exploring,
            ReportField::ActiveLearning => &mut self.active_learning,
            ReportField::CreatingAndThinkingCritically => {
                &mut self.creating_and_thinking_critically
            }
            ReportField::CommunicationAndLanguageNextSteps => {
                &mut self.communication_and_language_next_steps
            }
            ReportField::PhysicalDevelopmentNextSteps => &mut self.physical_development_next_steps,
            ReportField::PersonalSocialEmotionalDevelopmentNextSteps => {
                &mut self.personal_social_emotional_development_next_steps
            }
            ReportField::LiteracyNextSteps => &mut self.literacy_next_steps,
            ReportField::MathematicsNextSteps => &mut self.mathematics_next_steps,
            ReportField::UnderstandingTheWorldNextSteps => {
                &mut self.understanding_the_world_next_steps
            }
            ReportField::ExpressiveArtsAndDesignNextSteps => {
                &mut self.expressive_arts_and_design_next_steps
            }
            ReportField::ReligiousEducationComments => &mut self.religious_education_comments,
            ReportField::GeneralComments => &mut self.general_comments,
        };
        *slot = text;
    }

    /// Fields that hold no usable text: blank or still carrying the marker.
    pub fn unfilled_fields(&self) -> Vec<ReportField> {
        ReportField::ALL
            .into_iter()
            .filter(|&f| is_unfilled(self.get(f)))
            .collect()
    }
}

pub fn is_unfilled(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == UNCHANGED_MARKER
}

#[cfg(test)]
impl ReportContent {
    /// Every field set to `"<prefix> <fieldKey>"`.
    pub fn sample(prefix: &str) -> Self {
        let mut content = ReportContent::filled("");
        for field in ReportField::ALL {
            content.set(field, format!("{prefix} {}", field.key()));
        }
        content
    }
}
