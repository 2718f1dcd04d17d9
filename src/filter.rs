// 🥈 Silver Filter

use crate::model::Plan;

/// Keep only Silver plans (exact, case-sensitive match on `metal_level`).
pub fn silver_plans(plans: &[Plan]) -> Vec<Plan> {
    plans.iter().filter(|p| p.is_silver()).cloned().collect()
}
