//! Inference Engine. One-pass closure over the rule families in `vocabulary`.
//!
//! Families run in order (framework → language → infrastructure). Each family
//! iterates a snapshot of its trigger category taken when the family starts,
//! so skills inferred by an earlier family are visible to later ones.

use std::collections::HashSet;

use tracing::debug;

use crate::extraction::vocabulary::{is_recognized, RuleFamily, INFERENCE_FAMILIES};
use crate::models::profile::Skills;

/// Expands `detected` with every implied skill. Skills in `hedged` never act
/// as a trigger. They stay in the output; only their implications are withheld.
pub fn infer_excluding(detected: &Skills, hedged: &HashSet<String>) -> Skills {
    let mut skills = detected.clone();
    for family in INFERENCE_FAMILIES {
        apply_family(&mut skills, family, hedged);
    }
    skills
}

fn apply_family(skills: &mut Skills, family: &RuleFamily, hedged: &HashSet<String>) {
    let triggers = skills.get(family.trigger_category).to_vec();

    for trigger in &triggers {
        if hedged.contains(trigger) {
            debug!("Not inferring from '{trigger}': limited experience");
            continue;
        }
        let Some(rule) = family.rules.iter().find(|r| r.trigger == trigger.as_str()) else {
            continue;
        };
        for &(category, name) in rule.implies {
            if is_recognized(category, name) && skills.insert(category, name) {
                debug!(
                    "Inferred {} '{}' from '{}'",
                    category.as_str(),
                    name,
                    trigger
                );
            }
        }
    }
}
