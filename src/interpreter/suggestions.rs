use crate::models::RiskFlags;

/// One fixed tip per raised flag; a maintenance tip when everything is clear.
pub fn lifestyle_suggestions(flags: &RiskFlags) -> Vec<String> {
    let mut tips = Vec::new();

    if flags.anemia {
        tips.push(
            "Add iron-rich foods (spinach, lentils, dates) and vitamin C sources.".to_string(),
        );
    }
    if flags.cardio {
        tips.push(
            "Reduce fried foods, increase fiber, and aim for 150 min/week exercise.".to_string(),
        );
    }
    if flags.infection {
        tips.push(
            "Hydrate well, prioritize sleep, and consult a clinician if fever persists."
                .to_string(),
        );
    }

    if tips.is_empty() {
        tips.push(
            "Maintain balanced diet, regular movement, and annual preventive checkups."
                .to_string(),
        );
    }

    tips
}
