use serde::{Deserialize, Serialize};

/// Progress bands offered for Religious Education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    Some,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
}

impl Progress {
    pub const ALL: [Progress; 3] = [Progress::Some, Progress::Good, Progress::VeryGood];

    pub fn label(self) -> &'static str {
        match self {
            Progress::Some => "Some",
            Progress::Good => "Good",
            Progress::VeryGood => "Very Good",
        }
    }
}

/// Observed early-learning skills. Every toggle defaults to `false` when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillToggles {
    pub listening_attention_understanding: bool,
    pub speaking: bool,
    pub gross_motor_skills: bool,
    pub fine_motor_skills: bool,
    pub self_regulation: bool,
    pub managing_self: bool,
    pub building_relationships: bool,
    pub comprehension: bool,
    pub word_reading: bool,
    pub writing: bool,
    pub number: bool,
    pub numerical_patterns: bool,
    pub past_and_present: bool,
    pub people_culture_communities: bool,
    pub the_natural_world: bool,
    pub creating_with_materials: bool,
    pub being_imaginative_expressive: bool,
}

/// One skill toggle, keyed the same way as the JSON field it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    ListeningAttentionUnderstanding,
    Speaking,
    GrossMotorSkills,
    FineMotorSkills,
    SelfRegulation,
    ManagingSelf,
    BuildingRelationships,
    Comprehension,
    WordReading,
    Writing,
    Number,
    NumericalPatterns,
    PastAndPresent,
    PeopleCultureCommunities,
    TheNaturalWorld,
    CreatingWithMaterials,
    BeingImaginativeExpressive,
}

impl Skill {
    pub fn label(self) -> &'static str {
        match self {
            Skill::ListeningAttentionUnderstanding => "Listening, Attention and Understanding",
            Skill::Speaking => "Speaking",
            Skill::GrossMotorSkills => "Gross Motor Skills",
            Skill::FineMotorSkills => "Fine Motor Skills",
            Skill::SelfRegulation => "Self-regulation",
            Skill::ManagingSelf => "Managing Self",
            Skill::BuildingRelationships => "Building Relationships",
            Skill::Comprehension => "Comprehension",
            Skill::WordReading => "Word Reading",
            Skill::Writing => "Writing",
            Skill::Number => "Number",
            Skill::NumericalPatterns => "Numerical Patterns",
            Skill::PastAndPresent => "Past and Present",
            Skill::PeopleCultureCommunities => "People, Culture and Communities",
            Skill::TheNaturalWorld => "The Natural World",
            Skill::CreatingWithMaterials => "Creating with Materials",
            Skill::BeingImaginativeExpressive => "Being Imaginative and Expressive",
        }
    }
}

impl SkillToggles {
    pub fn is_set(&self, skill: Skill) -> bool {
        match skill {
            Skill::ListeningAttentionUnderstanding => self.listening_attention_understanding,
            Skill::Speaking => self.speaking,
            Skill::GrossMotorSkills => self.gross_motor_skills,
            Skill::FineMotorSkills => self.fine_motor_skills,
            Skill::SelfRegulation => self.self_regulation,
            Skill::ManagingSelf => self.managing_self,
            Skill::BuildingRelationships => self.building_relationships,
            Skill::Comprehension => self.comprehension,
            Skill::WordReading => self.word_reading,
            Skill::Writing => self.writing,
            Skill::Number => self.number,
            Skill::NumericalPatterns => self.numerical_patterns,
            Skill::PastAndPresent => self.past_and_present,
            Skill::PeopleCultureCommunities => self.people_culture_communities,
            Skill::TheNaturalWorld => self.the_natural_world,
            Skill::CreatingWithMaterials => self.creating_with_materials,
            Skill::BeingImaginativeExpressive => self.being_imaginative_expressive,
        }
    }

    #[cfg(test)]
    pub fn with(mut self, skill: Skill) -> Self {
        let slot = match skill {
            Skill::ListeningAttentionUnderstanding => &mut self.listening_attention_understanding,
            Skill::Speaking => &mut self.speaking,
            Skill::GrossMotorSkills => &mut self.gross_motor_skills,
            Skill::FineMotorSkills => &mut self.fine_motor_skills,
            Skill::SelfRegulation => &mut self.self_regulation,
            Skill::ManagingSelf => &mut self.managing_self,
            Skill::BuildingRelationships => &mut self.building_relationships,
            Skill::Comprehension => &mut self.comprehension,
            Skill::WordReading => &mut self.word_reading,
            Skill::Writing => &mut self.writing,
            Skill::Number => &mut self.number,
            Skill::NumericalPatterns => &mut self.numerical_patterns,
            Skill::PastAndPresent => &mut self.past_and_present,
            Skill::PeopleCultureCommunities => &mut self.people_culture_communities,
            Skill::TheNaturalWorld => &mut self.the_natural_world,
            Skill::CreatingWithMaterials => &mut self.creating_with_materials,
            Skill::BeingImaginativeExpressive => &mut self.being_imaginative_expressive,
        };
        *slot = true;
        self
    }
}

/// The student record as submitted by the report form.
///
/// Optional text fields default to an empty string and skill toggles to `false`,
/// so downstream code never has to distinguish "missing" from "blank".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub attendance: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub early_learning_goals: String,
    /// Required; left as `Option` so a missing value surfaces as a validation error
    /// rather than a JSON rejection.
    #[serde(default)]
    pub religious_education_progress: Option<Progress>,
    #[serde(flatten)]
    pub skills: SkillToggles,
}

#[cfg(test)]
impl StudentRecord {
    pub fn sample() -> Self {
        StudentRecord {
            student_name: "Jane Doe".to_string(),
            attendance: "97%".to_string(),
            notes: "Loves the construction area.".to_string(),
            early_learning_goals: String::new(),
            religious_education_progress: Some(Progress::Good),
            skills: SkillToggles::default()
                .with(Skill::Speaking)
                .with(Skill::Number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields_fill_defaults() {
        let json = serde_json::json!({
            "studentName": "Sam Lee",
            "attendance": "92%",
            "religiousEducationProgress": "Very Good",
            "speaking": true
        });
        let record: StudentRecord = serde_json::from_value(json).unwrap();

        assert_eq!(record.notes, "");
        assert_eq!(record.early_learning_goals, "");
        assert_eq!(record.religious_education_progress, Some(Progress::VeryGood));
        assert!(record.skills.speaking);
        assert!(!record.skills.writing);
        assert!(!record.skills.being_imaginative_expressive);
    }

    #[test]
    fn test_missing_progress_is_none_not_error() {
        let json = serde_json::json!({ "studentName": "Sam", "attendance": "90%" });
        let record: StudentRecord = serde_json::from_value(json).unwrap();
        assert!(record.religious_education_progress.is_none());
    }

    #[test]
    fn test_unknown_progress_band_is_rejected() {
        let json = serde_json::json!({
            "studentName": "Sam",
            "attendance": "90%",
            "religiousEducationProgress": "Excellent"
        });
        assert!(serde_json::from_value::<StudentRecord>(json).is_err());
    }

    #[test]
    fn test_skill_enum_matches_toggle_keys() {
        let key = serde_json::to_value(Skill::PeopleCultureCommunities).unwrap();
        assert_eq!(key, "peopleCultureCommunities");

        let toggles = SkillToggles::default().with(Skill::TheNaturalWorld);
        let json = serde_json::to_value(&toggles).unwrap();
        assert_eq!(json["theNaturalWorld"], true);
        assert!(toggles.is_set(Skill::TheNaturalWorld));
        assert!(!toggles.is_set(Skill::PastAndPresent));
    }
}
