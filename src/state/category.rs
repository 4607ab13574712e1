/// Project category classification
///
/// Folder names coming out of the asset pipeline are free text, so the
/// category is derived by substring matching against an ordered rule list.
/// The first rule with a matching pattern wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Renovation,
    Commercial,
    Infrastructure,
    Villa,
    Residential,
    Other,
}

impl Category {
    /// Every category, in the order filter chips are shown
    pub const ALL: [Category; 6] = [
        Category::Residential,
        Category::Villa,
        Category::Commercial,
        Category::Infrastructure,
        Category::Renovation,
        Category::Other,
    ];

    /// Dictionary key for the category label
    pub fn translation_key(self) -> &'static str {
        match self {
            Category::Renovation => "projects.categories.renovation",
            Category::Commercial => "projects.categories.commercial",
            Category::Infrastructure => "projects.categories.infrastructure",
            Category::Villa => "projects.categories.villa",
            Category::Residential => "projects.categories.residential",
            Category::Other => "projects.categories.other",
        }
    }
}

/// Priority-ordered rules. Patterns are already case-folded.
const RULES: &[(&[&str], Category)] = &[
    (
        &["tadilat", "restorasyon", "güçlendirme", "cephe", "çati"],
        Category::Renovation,
    ),
    (
        &["iş merkezi", "plaza", "avm", "ofis", "ticari", "beosis"],
        Category::Commercial,
    ),
    (
        &["beton", "altyapi", "köprü", "istinat", "fabrika"],
        Category::Infrastructure,
    ),
    (&["villa"], Category::Villa),
    (
        &["konut", "residence", "rezidans", "evleri", "nefes", "vital", "parla"],
        Category::Residential,
    ),
];

/// Classify a project by its folder name. Total: unmatched names are `Other`.
pub fn classify(folder: &str) -> Category {
    let folded = fold_case(folder);

    RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|pattern| folded.contains(*pattern)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// Lowercase with Turkish `İ`, `I` and `ı` all collapsed to `i`.
///
/// Plain `to_lowercase` turns `İ` into `i` plus a combining dot, which would
/// never match the patterns above.
fn fold_case(input: &str) -> String {
    input
        .chars()
        .flat_map(|c| match c {
            'İ' | 'I' | 'ı' => 'i'.to_lowercase(),
            other => other.to_lowercase(),
        })
        .collect()
}
