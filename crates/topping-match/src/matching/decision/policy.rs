use super::rules::TallySignals;
use crate::matching::domain::Topping;

/// Selection is priority-ordered, not max-score: sprinkles wins with any
/// vote, then coconut, then peanuts. Peanuts are skipped entirely while the
/// allergy gate is up; with nothing else voted for, the recommendation falls
/// back to sprinkles, the top of the priority order and never excludable.
/// The returned flag is true exactly when the gate changed the outcome.
pub(crate) fn select_topping(signals: &TallySignals) -> (Topping, bool) {
    if signals.sprinkles > 0 {
        return (Topping::Sprinkles, false);
    }
    if signals.coconut > 0 {
        return (Topping::Coconut, false);
    }
    if signals.allergy.blocks_peanuts() {
        return (Topping::Sprinkles, true);
    }
    (Topping::Peanuts, false)
}

pub(crate) fn rationale(topping: Topping, allergy_adjusted: bool) -> String {
    let base = match topping {
        Topping::Sprinkles => "הבחירות הצבעוניות והשמחות שלך הובילו אותנו ישר לסוכריות צבעוניות",
        Topping::Coconut => "הבחירות הרגועות והמאוזנות שלך מתאימות בדיוק לקוקוס",
        Topping::Peanuts => "האנרגיה והעוצמה שבבחירות שלך מתאימות בדיוק לבוטנים",
    };

    if allergy_adjusted {
        format!("{base} (התאמנו את ההמלצה בעקבות הרגישות לבוטנים 🥜)")
    } else {
        base.to_string()
    }
}
