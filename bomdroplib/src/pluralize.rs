//! Display-name pluralization.
//!
//! Item names come from the dataset and may already be plural ("Coffees"),
//! carry a trailing qualifier ("Tim Tam Packet (200g)"), or be ordinary
//! singular nouns. [`Pluralizer`] applies a fixed, ordered list of suffix
//! rules; the first rule that matches the name decides its plural form.
//!
//! The rules are a heuristic, not a dictionary. Irregular nouns ("Child",
//! "Person") are not special-cased by default. Callers that need them can
//! register overrides with [`Pluralizer::with_irregular`]; overrides are
//! consulted before any rule.

/// Last-word endings treated as already plural.
const PLURAL_ENDINGS: &[&str] = &[
    "ies", "oes", "ses", "xes", "zes", "ches", "shes", "ves", "ees",
];

/// Endings that take "es".
const SIBILANT_ENDINGS: &[&str] = &["s", "x", "z", "ch", "sh"];

/// Endings where a final "y" stays and just takes "s".
const VOWEL_Y_ENDINGS: &[&str] = &["ay", "ey", "oy", "uy"];

/// A single suffix rule: when `matches` holds, `apply` gives the plural.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier for diagnostics
    pub name: &'static str,
    matches: fn(&str) -> bool,
    apply: fn(&str) -> String,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The default rule list, in precedence order. The last rule always matches.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        name: "already-plural",
        matches: last_word_looks_plural,
        apply: unchanged,
    },
    Rule {
        name: "consonant-y",
        matches: ends_in_consonant_y,
        apply: replace_y_with_ies,
    },
    Rule {
        name: "sibilant",
        matches: ends_in_sibilant,
        apply: append_es,
    },
    Rule {
        name: "default",
        matches: always,
        apply: append_s,
    },
];

fn last_word(name: &str) -> &str {
    name.rsplit(' ').next().unwrap_or(name)
}

fn last_word_looks_plural(name: &str) -> bool {
    let word = last_word(name);
    PLURAL_ENDINGS.iter().any(|end| word.ends_with(end))
}

fn unchanged(name: &str) -> String {
    name.to_string()
}

fn ends_in_consonant_y(name: &str) -> bool {
    name.ends_with('y') && !VOWEL_Y_ENDINGS.iter().any(|end| name.ends_with(end))
}

fn replace_y_with_ies(name: &str) -> String {
    format!("{}ies", &name[..name.len() - 1])
}

fn ends_in_sibilant(name: &str) -> bool {
    SIBILANT_ENDINGS.iter().any(|end| name.ends_with(end))
}

fn append_es(name: &str) -> String {
    format!("{name}es")
}

fn always(_: &str) -> bool {
    true
}

fn append_s(name: &str) -> String {
    format!("{name}s")
}

/// Split "Base (qualifier)" into ("Base", " (qualifier)").
///
/// The qualifier is the earliest "(" after the last inner ")" that leaves a
/// non-empty body before the final ")". Whitespace in front of it travels
/// with the qualifier. Names that are nothing but a qualifier are not split.
fn split_qualifier(name: &str) -> Option<(&str, &str)> {
    let body = name.strip_suffix(')')?;
    let segment_start = body.rfind(')').map_or(0, |i| i + 1);
    let open = segment_start + body[segment_start..].find('(')?;
    if open + 1 == body.len() {
        return None;
    }
    let base = name[..open].trim_end();
    if base.is_empty() {
        return None;
    }
    Some((base, &name[base.len()..]))
}

/// Rule-based pluralizer with an optional irregular-noun table.
#[derive(Debug, Clone)]
pub struct Pluralizer {
    irregular: Vec<(String, String)>,
    rules: &'static [Rule],
}

impl Default for Pluralizer {
    fn default() -> Self {
        Self {
            irregular: Vec::new(),
            rules: DEFAULT_RULES,
        }
    }
}

impl Pluralizer {
    /// Create a pluralizer with the default rules and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an irregular plural for a final word, matched
    /// case-insensitively ("child" → "children").
    pub fn with_irregular(mut self, singular: &str, plural: &str) -> Self {
        self.irregular
            .push((singular.to_lowercase(), plural.to_lowercase()));
        self
    }

    /// Display form of `name` for `quantity` items.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bomdroplib::Pluralizer;
    ///
    /// let p = Pluralizer::new();
    /// assert_eq!(p.pluralize("Tim Tam Packet (200g)", 5), "Tim Tam Packets (200g)");
    /// assert_eq!(p.pluralize("City", 3), "Cities");
    /// assert_eq!(p.pluralize("Ambulance", 1), "Ambulance");
    /// ```
    pub fn pluralize(&self, name: &str, quantity: u64) -> String {
        if quantity == 1 {
            return name.to_string();
        }
        if let Some((base, qualifier)) = split_qualifier(name) {
            return format!("{}{}", self.pluralize(base, quantity), qualifier);
        }
        if let Some(plural) = self.irregular_plural(name) {
            return plural;
        }
        self.rule_for(name).map_or_else(|| name.to_string(), |rule| (rule.apply)(name))
    }

    /// The rule that decides `name`'s plural.
    pub fn rule_for(&self, name: &str) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| (rule.matches)(name))
    }

    fn irregular_plural(&self, name: &str) -> Option<String> {
        let word = last_word(name);
        let lower = word.to_lowercase();
        let (_, plural) = self.irregular.iter().find(|(s, _)| *s == lower)?;
        let prefix = &name[..name.len() - word.len()];
        Some(format!("{prefix}{}", match_case(word, plural)))
    }
}

/// Give `plural` the leading capital of `original`, if it had one.
fn match_case(original: &str, plural: &str) -> String {
    let mut chars = plural.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(p)) if first.is_uppercase() => {
            p.to_uppercase().chain(chars).collect()
        }
        _ => plural.to_string(),
    }
}

/// Pluralize with the default rules.
pub fn pluralize(name: &str, quantity: u64) -> String {
    Pluralizer::default().pluralize(name, quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_one_is_identity() {
        for name in ["Ambulance", "City", "Coffees", "Tim Tam Packet (200g)", ""] {
            assert_eq!(pluralize(name, 1), name);
        }
    }

    #[test]
    fn test_zero_is_plural() {
        assert_eq!(pluralize("Ambulance", 0), "Ambulances");
    }

    #[test]
    fn test_default_rule() {
        assert_eq!(pluralize("Ambulance", 2), "Ambulances");
        assert_eq!(pluralize("Flat White", 10), "Flat Whites");
    }

    #[test]
    fn test_consonant_y() {
        assert_eq!(pluralize("City", 3), "Cities");
        assert_eq!(pluralize("Teddy", 2), "Teddies");
    }

    #[test]
    fn test_vowel_y() {
        assert_eq!(pluralize("Toy", 4), "Toys");
        assert_eq!(pluralize("Day", 2), "Days");
        assert_eq!(pluralize("Survey", 2), "Surveys");
        assert_eq!(pluralize("Guy", 2), "Guys");
    }

    #[test]
    fn test_sibilants() {
        assert_eq!(pluralize("Bus", 2), "Buses");
        assert_eq!(pluralize("Fax", 2), "Faxes");
        assert_eq!(pluralize("Waltz", 2), "Waltzes");
        assert_eq!(pluralize("Sandwich", 2), "Sandwiches");
        assert_eq!(pluralize("Dish", 2), "Dishes");
    }

    #[test]
    fn test_already_plural_untouched() {
        assert_eq!(pluralize("Coffees", 5), "Coffees");
        assert_eq!(pluralize("Box of Matches", 5), "Box of Matches");
        assert_eq!(pluralize("Fresh Strawberries", 5), "Fresh Strawberries");
        assert_eq!(pluralize("Potatoes", 5), "Potatoes");
        assert_eq!(pluralize("Knives", 5), "Knives");
    }

    #[test]
    fn test_parenthetical_qualifier() {
        assert_eq!(pluralize("Tim Tam Packet (200g)", 5), "Tim Tam Packets (200g)");
        assert_eq!(
            pluralize("Registered Nurse (1 year)", 984),
            "Registered Nurses (1 year)"
        );
        assert_eq!(pluralize("Battery (AA)", 2), "Batteries (AA)");
        assert_eq!(pluralize("Sandwich(large)", 2), "Sandwiches(large)");
    }

    #[test]
    fn test_qualifier_edge_cases() {
        // Groups are peeled from the end, one at a time.
        assert_eq!(pluralize("Box (big) (red)", 2), "Boxes (big) (red)");
        // An empty group is not a qualifier.
        assert_eq!(pluralize("Widget ()", 2), "Widget ()s");
        // A bare qualifier is treated as an ordinary name.
        assert_eq!(pluralize("(200g)", 2), "(200g)s");
    }

    #[test]
    fn test_irregular_nouns_default_to_heuristic() {
        assert_eq!(pluralize("Child", 2), "Childs");
        assert_eq!(pluralize("Fish", 2), "Fishes");
    }

    #[test]
    fn test_irregular_overrides() {
        let p = Pluralizer::new()
            .with_irregular("child", "children")
            .with_irregular("person", "people");
        assert_eq!(p.pluralize("Child", 2), "Children");
        assert_eq!(p.pluralize("Childcare for a Child", 2), "Childcare for a Children");
        assert_eq!(p.pluralize("Extra person", 3), "Extra people");
        assert_eq!(p.pluralize("Person (adult)", 3), "People (adult)");
        assert_eq!(p.pluralize("Person", 1), "Person");
        assert_eq!(p.pluralize("Ambulance", 2), "Ambulances");
    }

    #[test]
    fn test_rule_for_reports_precedence() {
        let p = Pluralizer::new();
        assert_eq!(p.rule_for("Coffees").unwrap().name, "already-plural");
        assert_eq!(p.rule_for("City").unwrap().name, "consonant-y");
        assert_eq!(p.rule_for("Bus").unwrap().name, "sibilant");
        assert_eq!(p.rule_for("Toy").unwrap().name, "default");
    }
}
