use crate::models::report::{ReportContent, ReportField, UNCHANGED_MARKER};

/// Swaps one regenerated field into an existing report.
///
/// Returns `previous` with `field` replaced by `generated[field]`, unless that value
/// is the unchanged marker. No other field of `generated` is read.
pub fn merge_regenerated(
    previous: &ReportContent,
    generated: &ReportContent,
    field: ReportField,
) -> ReportContent {
    let mut merged = previous.clone();
    let fresh = generated.get(field);
    if fresh.trim() != UNCHANGED_MARKER {
        merged.set(field, fresh.to_string());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regenerated(field: ReportField, text: &str) -> ReportContent {
        let mut content = ReportContent::unchanged();
        content.set(field, text.to_string());
        content
    }

    #[test]
    fn test_replaces_only_target_field() {
        let previous = ReportContent::sample("old");
        let generated = regenerated(ReportField::LiteracyNextSteps, "Practise blending CVC words.");

        let merged = merge_regenerated(&previous, &generated, ReportField::LiteracyNextSteps);

        assert_eq!(merged.literacy_next_steps, "Practise blending CVC words.");
        for field in ReportField::ALL {
            if field != ReportField::LiteracyNextSteps {
                assert_eq!(merged.get(field), previous.get(field), "{field:?} changed");
            }
        }
    }

    #[test]
    fn test_marker_in_target_keeps_previous() {
        let previous = ReportContent::sample("old");
        let generated = ReportContent::unchanged();

        let merged = merge_regenerated(&previous, &generated, ReportField::GeneralComments);
        assert_eq!(merged, previous);
    }

    #[test]
    fn test_other_generated_fields_are_ignored() {
        // Even if the model ignores the marker instruction, unrelated fields survive.
        let previous = ReportContent::sample("old");
        let generated = ReportContent::sample("new");

        let merged = merge_regenerated(&previous, &generated, ReportField::ActiveLearning);
        assert_eq!(merged.active_learning, "new activeLearning");
        assert_eq!(merged.playing_and_exploring, "old playingAndExploring");
        assert_eq!(merged.general_comments, "old generalComments");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let previous = ReportContent::sample("old");
        let generated = regenerated(ReportField::MathematicsNextSteps, "Count to 20.");

        let once = merge_regenerated(&previous, &generated, ReportField::MathematicsNextSteps);
        let twice = merge_regenerated(&once, &generated, ReportField::MathematicsNextSteps);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merges_of_different_fields_commute() {
        let previous = ReportContent::sample("old");
        let a = regenerated(ReportField::ActiveLearning, "A");
        let b = regenerated(ReportField::GeneralComments, "B");

        let ab = merge_regenerated(
            &merge_regenerated(&previous, &a, ReportField::ActiveLearning),
            &b,
            ReportField::GeneralComments,
        );
        let ba = merge_regenerated(
            &merge_regenerated(&previous, &b, ReportField::GeneralComments),
            &a,
            ReportField::ActiveLearning,
        );
        assert_eq!(ab, ba);
    }
}
