//! Category weight transitions.
//!
//! The three transitions are pure functions over [`CategoryProbabilities`];
//! [`CategoryWeightEngine`] owns the current vector for a session and applies
//! them in response to [`WeightGesture`]s.

use catalog::Category;
use foundation::math::{round_to_decimals, stable_total_cmp_f64};
use tracing::debug;

use crate::probabilities::{CategoryProbabilities, SUM_TOLERANCE, TOTAL};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WeightGesture {
    Click(Category),
    Hold(Category),
    DoubleClick(Category),
}

/// Tuning for the continuous hold transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HoldConfig {
    /// Weight added to the held category per repeat.
    pub increment: f64,
    /// Decimal places every weight is rounded to after a hold step.
    pub precision_decimals: u32,
    /// Rounded sums further than this from 100 are renormalized.
    pub tolerance: f64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            increment: 1.0,
            precision_decimals: 2,
            tolerance: SUM_TOLERANCE,
        }
    }
}

/// Toggles `category` in the equally weighted active set.
///
/// The opposite of `category` is always forced to zero. Deactivating the only
/// active category re-activates it at 100, so the vector is never all-zero.
pub fn click(p: &CategoryProbabilities, category: Category) -> CategoryProbabilities {
    let mut values = p.values();
    values[category.opposite().index()] = 0.0;

    let idx = category.index();
    let mut members: Vec<usize> = if values[idx] > 0.0 {
        values[idx] = 0.0;
        active_indices(&values)
    } else {
        let mut m = active_indices(&values);
        m.push(idx);
        m
    };

    if members.is_empty() {
        members.push(idx);
    }
    CategoryProbabilities::from_raw(split_evenly(&members))
}

/// Moves `config.increment` of weight onto `category`.
///
/// The increment is drained proportionally from every category except
/// `category` and its opposite (which is forced to zero). Results are rounded
/// and renormalized so the sum stays at 100.
pub fn hold(
    p: &CategoryProbabilities,
    category: Category,
    config: &HoldConfig,
) -> CategoryProbabilities {
    let mut values = p.values();
    let idx = category.index();
    let opp = category.opposite().index();
    let delta = config.increment.max(0.0);

    values[opp] = 0.0;
    values[idx] += delta;

    let others: Vec<usize> = (0..Category::COUNT)
        .filter(|&i| i != idx && i != opp)
        .collect();
    let others_sum: f64 = others.iter().map(|&i| values[i]).sum();

    // Shrinking a zero-sum set is undefined; the renormalization below covers it.
    if others_sum > 0.0 {
        let factor = ((others_sum - delta) / others_sum).max(0.0);
        for &i in &others {
            values[i] *= factor;
        }
    }

    values[idx] = values[idx].min(TOTAL);
    CategoryProbabilities::from_raw(finalize(values, category, config))
}

/// `category` at 100, everything else at 0.
pub fn double_click(category: Category) -> CategoryProbabilities {
    CategoryProbabilities::sole(category)
}

pub fn apply(
    p: &CategoryProbabilities,
    gesture: WeightGesture,
    hold_config: &HoldConfig,
) -> CategoryProbabilities {
    match gesture {
        WeightGesture::Click(c) => click(p, c),
        WeightGesture::Hold(c) => hold(p, c, hold_config),
        WeightGesture::DoubleClick(c) => double_click(c),
    }
}

fn active_indices(values: &[f64; Category::COUNT]) -> Vec<usize> {
    (0..Category::COUNT).filter(|&i| values[i] > 0.0).collect()
}

fn split_evenly(members: &[usize]) -> [f64; Category::COUNT] {
    let mut values = [0.0; Category::COUNT];
    let share = TOTAL / members.len() as f64;
    for &i in members {
        values[i] = share;
    }
    values
}

/// Rounds every weight, renormalizes multiplicatively when the rounded sum is
/// out of tolerance, then assigns the remaining rounding residual to the
/// largest weight (lowest canonical index on ties).
fn finalize(
    mut values: [f64; Category::COUNT],
    fallback: Category,
    config: &HoldConfig,
) -> [f64; Category::COUNT] {
    let decimals = config.precision_decimals;
    for v in values.iter_mut() {
        *v = round_to_decimals(v.clamp(0.0, TOTAL), decimals);
    }

    let sum: f64 = values.iter().sum();
    if sum <= 0.0 {
        let mut out = [0.0; Category::COUNT];
        out[fallback.index()] = TOTAL;
        return out;
    }

    if (sum - TOTAL).abs() > config.tolerance {
        let correction = TOTAL / sum;
        for v in values.iter_mut() {
            *v = round_to_decimals(*v * correction, decimals);
        }
    }

    let residual = TOTAL - values.iter().sum::<f64>();
    if residual != 0.0 {
        let largest = (0..Category::COUNT)
            .rev()
            .max_by(|&a, &b| stable_total_cmp_f64(values[a], values[b]))
            .unwrap_or(fallback.index());
        values[largest] = round_to_decimals(values[largest] + residual, decimals).clamp(0.0, TOTAL);
    }
    values
}

/// Owns the session's weight vector.
#[derive(Debug, Clone)]
pub struct CategoryWeightEngine {
    default_category: Category,
    hold_config: HoldConfig,
    probabilities: CategoryProbabilities,
}

impl CategoryWeightEngine {
    /// Starts with `default_category` at 100.
    pub fn new(default_category: Category) -> Self {
        Self::with_hold_config(default_category, HoldConfig::default())
    }

    pub fn with_hold_config(default_category: Category, hold_config: HoldConfig) -> Self {
        Self {
            default_category,
            hold_config,
            probabilities: CategoryProbabilities::sole(default_category),
        }
    }

    pub fn probabilities(&self) -> &CategoryProbabilities {
        &self.probabilities
    }

    pub fn default_category(&self) -> Category {
        self.default_category
    }

    pub fn hold_config(&self) -> &HoldConfig {
        &self.hold_config
    }

    pub fn apply(&mut self, gesture: WeightGesture) -> &CategoryProbabilities {
        let next = apply(&self.probabilities, gesture, &self.hold_config);
        debug_assert!(next.check().is_ok(), "{gesture:?} produced {next}");
        debug!(?gesture, weights = %next, "weights updated");
        self.probabilities = next;
        &self.probabilities
    }

    pub fn click(&mut self, category: Category) -> &CategoryProbabilities {
        self.apply(WeightGesture::Click(category))
    }

    pub fn hold(&mut self, category: Category) -> &CategoryProbabilities {
        self.apply(WeightGesture::Hold(category))
    }

    pub fn double_click(&mut self, category: Category) -> &CategoryProbabilities {
        self.apply(WeightGesture::DoubleClick(category))
    }

    /// Back to the initial vector.
    pub fn reset(&mut self) {
        self.probabilities = CategoryProbabilities::sole(self.default_category);
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryWeightEngine, HoldConfig, WeightGesture, click, double_click, hold};
    use crate::probabilities::CategoryProbabilities;
    use catalog::Category::{self, *};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn vector(p: &CategoryProbabilities) -> [f64; 6] {
        p.values()
    }

    fn assert_close(a: [f64; 6], b: [f64; 6]) {
        for i in 0..6 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn click_adds_second_category_with_equal_split() {
        let p = CategoryProbabilities::sole(Wise);
        let p = click(&p, Beautiful);
        assert_close(vector(&p), [50.0, 0.0, 50.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn click_deactivates_active_category() {
        let p = click(&CategoryProbabilities::sole(Wise), Beautiful);
        let p = click(&p, Wise);
        assert_close(vector(&p), [0.0, 0.0, 100.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn click_on_sole_active_category_keeps_it_at_full_weight() {
        let p = CategoryProbabilities::sole(Funny);
        let p = click(&p, Funny);
        assert_eq!(p, CategoryProbabilities::sole(Funny));
    }

    #[test]
    fn click_on_opposite_replaces_it() {
        let p = click(&CategoryProbabilities::sole(Wise), Beautiful);
        let p = click(&p, Stupid);
        assert_close(vector(&p), [0.0, 50.0, 50.0, 0.0, 0.0, 0.0]);

        let p = click(&CategoryProbabilities::sole(Wise), Stupid);
        assert_eq!(p, CategoryProbabilities::sole(Stupid));
    }

    #[test]
    fn three_way_split_sums_to_total() {
        let mut p = CategoryProbabilities::sole(Wise);
        p = click(&p, Beautiful);
        p = click(&p, Funny);
        for c in [Wise, Beautiful, Funny] {
            assert!((p.get(c) - 100.0 / 3.0).abs() < 1e-9);
        }
        assert!(p.check().is_ok());
    }

    #[test]
    fn hold_moves_weight_from_all_other_non_opposites() {
        let p = click(&click(&CategoryProbabilities::sole(Wise), Beautiful), Funny);
        let p = hold(&p, Wise, &HoldConfig::default());
        // Wise gains one point, beautiful and funny each give up half of it.
        // The 0.01 rounding residual lands on the largest weight.
        assert_close(vector(&p), [34.34, 0.0, 32.83, 0.0, 32.83, 0.0]);
        assert!(p.check().is_ok());
    }

    #[test]
    fn hold_survives_unrepresentable_precision() {
        let config = HoldConfig {
            precision_decimals: 400,
            ..HoldConfig::default()
        };
        let mut p = click(&click(&CategoryProbabilities::sole(Wise), Beautiful), Funny);
        for _ in 0..50 {
            p = hold(&p, Funny, &config);
            assert!(p.check().is_ok(), "{p}");
        }
        assert!(p.get(Funny) > 50.0);
    }

    #[test]
    fn hold_with_empty_drain_set_skips_shrink() {
        let p = hold(&CategoryProbabilities::sole(Wise), Wise, &HoldConfig::default());
        assert_eq!(p, CategoryProbabilities::sole(Wise));

        // Only the opposite was active: it is zeroed and the held category takes everything.
        let p = hold(&CategoryProbabilities::sole(Stupid), Wise, &HoldConfig::default());
        assert_eq!(p, CategoryProbabilities::sole(Wise));
    }

    #[test]
    fn sustained_hold_approaches_full_weight() {
        let mut engine = CategoryWeightEngine::new(Wise);
        engine.click(Beautiful);
        engine.click(Unfunny);
        let mut last = engine.probabilities().get(Funny);
        for _ in 0..200 {
            let now = engine.hold(Funny).get(Funny);
            assert!(now >= last);
            last = now;
        }
        assert!((last - 100.0).abs() < 1e-9);
        assert_eq!(engine.probabilities().get(Unfunny), 0.0);
    }

    #[test]
    fn double_click_overrides_any_state() {
        let mut p = click(&CategoryProbabilities::sole(Wise), Beautiful);
        p = hold(&p, Funny, &HoldConfig::default());
        assert_eq!(double_click(Repulsive), CategoryProbabilities::sole(Repulsive));
        let mut engine = CategoryWeightEngine::new(Wise);
        engine.click(Beautiful);
        assert_eq!(*engine.double_click(Stupid), CategoryProbabilities::sole(Stupid));
        assert!(p.check().is_ok());
    }

    #[test]
    fn reset_restores_default_category() {
        let mut engine = CategoryWeightEngine::new(Beautiful);
        engine.click(Wise);
        engine.reset();
        assert_eq!(*engine.probabilities(), CategoryProbabilities::sole(Beautiful));
    }

    #[test]
    fn random_gesture_sequences_preserve_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = CategoryWeightEngine::new(Wise);
        for step in 0..5000 {
            let c = Category::ALL[rng.gen_range(0..Category::COUNT)];
            let gesture = match rng.gen_range(0..10) {
                0..=3 => WeightGesture::Click(c),
                4..=8 => WeightGesture::Hold(c),
                _ => WeightGesture::DoubleClick(c),
            };
            let p = *engine.apply(gesture);
            assert!(p.check().is_ok(), "step {step} {gesture:?}: {p}");
            assert!((p.sum() - 100.0).abs() <= 0.01);
            for a in [Wise, Beautiful, Funny] {
                assert!(p.get(a) == 0.0 || p.get(a.opposite()) == 0.0);
            }
        }
    }
}
