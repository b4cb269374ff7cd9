use std::collections::HashSet;

/// A candidate recipe with its required-ingredient names resolved.
#[derive(Debug, Clone)]
pub struct CandidateRecipe {
    pub id: i32,
    pub name: String,
    /// Lower-cased required-ingredient names.
    pub ingredients: Vec<String>,
}

/// A recipe scored against a requested ingredient set.
#[derive(Debug, Clone)]
pub struct RankedRecipe {
    pub id: i32,
    /// Number of the recipe's required ingredients present in the request.
    pub match_count: usize,
    /// The ingredient names that matched, in recipe order.
    pub matching_ingredients: Vec<String>,
}

/// Normalize a comma-separated ingredient request: trim, lower-case,
/// drop blanks, dedup keeping first-occurrence order.
pub fn normalize_requested(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Rank candidate recipes by how many of their required ingredients
/// appear in the requested set.
///
/// Recipes with no overlap are dropped. Ordering is match count
/// descending, then recipe name ascending so equal scores come out
/// deterministically.
pub fn rank_recipes(candidates: Vec<CandidateRecipe>, requested: &[String]) -> Vec<RankedRecipe> {
    let requested: HashSet<&str> = requested.iter().map(String::as_str).collect();

    let mut ranked: Vec<(String, RankedRecipe)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let matching: Vec<String> = candidate
                .ingredients
                .iter()
                .filter(|name| requested.contains(name.as_str()))
                .cloned()
                .collect();

            if matching.is_empty() {
                return None;
            }

            Some((
                candidate.name,
                RankedRecipe {
                    id: candidate.id,
                    match_count: matching.len(),
                    matching_ingredients: matching,
                },
            ))
        })
        .collect();

    ranked.sort_by(|(name_a, a), (name_b, b)| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| name_a.cmp(name_b))
    });

    ranked.into_iter().map(|(_, r)| r).collect()
}
