use super::ScoreComponent;
use std::cmp::Reverse;

/// Picks the largest positive contributions first; equal contributions keep scoring order.
pub(crate) fn explanation_bullets(components: &[ScoreComponent], max_bullets: usize) -> Vec<String> {
    let mut positive: Vec<&ScoreComponent> = components
        .iter()
        .filter(|component| component.points > 0)
        .collect();
    positive.sort_by_key(|component| Reverse(component.points));

    positive
        .into_iter()
        .take(max_bullets)
        .map(|component| component.note.clone())
        .collect()
}
