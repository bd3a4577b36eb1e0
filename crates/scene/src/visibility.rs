use catalog::ContentPoint;
use rand::Rng;
use tracing::debug;
use weights::CategoryProbabilities;

/// How category weights turn into visible content.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FilterPolicy {
    /// Keep a point when its category weight is strictly above `floor` (0..=100).
    Threshold { floor: f64 },
    /// Keep a point with probability `weight / 100` of its category.
    ///
    /// Every pass draws fresh random values, so membership is not stable
    /// across passes even when the weights did not change.
    Sampling,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::Threshold { floor: 0.0 }
    }
}

/// Indices into `catalog` of the points that pass `policy`, in catalog order.
pub fn select_visible_indices<R>(
    catalog: &[ContentPoint],
    weights: &CategoryProbabilities,
    policy: FilterPolicy,
    rng: &mut R,
) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let visible: Vec<usize> = match policy {
        FilterPolicy::Threshold { floor } => catalog
            .iter()
            .enumerate()
            .filter(|(_, p)| weights.get(p.category) > floor)
            .map(|(i, _)| i)
            .collect(),
        FilterPolicy::Sampling => catalog
            .iter()
            .enumerate()
            .filter(|(_, p)| rng.r#gen::<f64>() < weights.probability(p.category))
            .map(|(i, _)| i)
            .collect(),
    };
    debug!(
        ?policy,
        total = catalog.len(),
        visible = visible.len(),
        "filter pass"
    );
    visible
}

/// Points of `catalog` that pass `policy`, in catalog order.
pub fn select_visible<'a, R>(
    catalog: &'a [ContentPoint],
    weights: &CategoryProbabilities,
    policy: FilterPolicy,
    rng: &mut R,
) -> Vec<&'a ContentPoint>
where
    R: Rng + ?Sized,
{
    select_visible_indices(catalog, weights, policy, rng)
        .into_iter()
        .map(|i| &catalog[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FilterPolicy, select_visible};
    use catalog::{Category, ContentPoint};
    use foundation::math::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use weights::{CategoryProbabilities, CategoryWeightEngine};

    fn catalog() -> Vec<ContentPoint> {
        let mut out = Vec::new();
        for (i, c) in Category::ALL.into_iter().cycle().take(600).enumerate() {
            out.push(ContentPoint::new(
                format!("c{i}"),
                Vec3::new(0.5, 0.5, 0.5),
                c,
                c.name(),
            ));
        }
        out
    }

    #[test]
    fn threshold_keeps_only_active_categories() {
        let mut engine = CategoryWeightEngine::new(Category::Wise);
        engine.click(Category::Funny);
        let cat = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let visible = select_visible(
            &cat,
            engine.probabilities(),
            FilterPolicy::default(),
            &mut rng,
        );
        assert_eq!(visible.len(), 200);
        assert!(
            visible
                .iter()
                .all(|p| matches!(p.category, Category::Wise | Category::Funny))
        );
    }

    #[test]
    fn threshold_floor_is_exclusive() {
        let mut engine = CategoryWeightEngine::new(Category::Wise);
        engine.click(Category::Funny);
        let cat = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let policy = FilterPolicy::Threshold { floor: 50.0 };
        assert!(select_visible(&cat, engine.probabilities(), policy, &mut rng).is_empty());
    }

    #[test]
    fn sampling_follows_weights() {
        let weights = CategoryProbabilities::sole(Category::Beautiful);
        let cat = catalog();
        let mut rng = StdRng::seed_from_u64(42);
        let visible = select_visible(&cat, &weights, FilterPolicy::Sampling, &mut rng);
        // Weight 100 keeps every beautiful point, weight 0 keeps none of the rest.
        assert_eq!(visible.len(), 100);
        assert!(visible.iter().all(|p| p.category == Category::Beautiful));
    }

    #[test]
    fn sampling_membership_changes_between_passes() {
        let mut engine = CategoryWeightEngine::new(Category::Wise);
        engine.click(Category::Beautiful);
        let cat = catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let a: Vec<String> = select_visible(&cat, engine.probabilities(), FilterPolicy::Sampling, &mut rng)
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        let b: Vec<String> = select_visible(&cat, engine.probabilities(), FilterPolicy::Sampling, &mut rng)
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_ne!(a, b);
        // 200 candidates at p = 0.5 each.
        assert!(a.len() > 60 && a.len() < 140, "{}", a.len());
    }

    #[test]
    fn empty_catalog() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = CategoryProbabilities::sole(Category::Wise);
        assert!(select_visible(&[], &w, FilterPolicy::Sampling, &mut rng).is_empty());
    }
}
