// ==========================================
// Nominal Compounds - Domain Entities
// ==========================================
// Graph node shapes: NominalCompound, Member, Author, Work
// ==========================================

/// Type label that marks a compound as a Grecism (case-insensitive).
pub const GRECISM_TYPE: &str = "Grecisms";

/// Subtype label that marks a compound as a Grecism (case-insensitive).
pub const GRECISM_SUBTYPE: &str = "Gr";

// ==========================================
// Compound
// ==========================================

/// A nominal compound as parsed from a spreadsheet row.
///
/// One record covers both import stages: the master sheet fills every
/// classification field, while work sheets may carry only the lemma (flat
/// layout) or lemma plus type/subtype (typed layout). `greek_form` is set
/// only for Grecisms, `occurrences` only for work-sheet rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub lemma: String,
    pub lexical_category: Option<String>,
    pub compound_type: Option<String>,
    pub subtype: Option<String>,
    pub greek_form: Option<String>,
    pub occurrences: i64,
}

impl Compound {
    pub fn new(lemma: String) -> Self {
        Self {
            lemma,
            lexical_category: None,
            compound_type: None,
            subtype: None,
            greek_form: None,
            occurrences: 0,
        }
    }

    /// True when the type/subtype pair equals the Grecism marker.
    /// Comparisons are case-insensitive.
    pub fn is_grecism(&self) -> bool {
        matches!(&self.compound_type, Some(t) if t.eq_ignore_ascii_case(GRECISM_TYPE))
            && matches!(&self.subtype, Some(s) if s.eq_ignore_ascii_case(GRECISM_SUBTYPE))
    }
}

// ==========================================
// Member
// ==========================================

/// One lexical constituent of a compound. A member slot in the master sheet
/// is either fully populated or fully blank; one-sided slots are rejected
/// by the row parser before this type is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub lemma: String,
    pub lexical_category: String,
}

// ==========================================
// Author
// ==========================================

/// The author block of a work sheet (row 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub century_of_birth: i64,
    pub century_of_death: i64,
}

impl Author {
    /// Header validation: name non-empty, both centuries non-zero.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.century_of_birth != 0 && self.century_of_death != 0
    }
}

// ==========================================
// Work
// ==========================================

/// The work block of a work sheet (rows 2-3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub title: String,
    pub genre: String,
    pub subgenre: String,
    pub acronym: String,
}

impl Work {
    /// Header validation: all four identifying fields non-empty.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
            && !self.genre.is_empty()
            && !self.subgenre.is_empty()
            && !self.acronym.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(ty: Option<&str>, sub: Option<&str>) -> Compound {
        Compound {
            lemma: "mundigenus".to_string(),
            lexical_category: Some("noun".to_string()),
            compound_type: ty.map(str::to_string),
            subtype: sub.map(str::to_string),
            greek_form: None,
            occurrences: 0,
        }
    }

    #[test]
    fn grecism_marker_is_case_insensitive() {
        assert!(compound(Some("Grecisms"), Some("Gr")).is_grecism());
        assert!(compound(Some("grecisms"), Some("GR")).is_grecism());
        assert!(compound(Some("GRECISMS"), Some("gr")).is_grecism());
    }

    #[test]
    fn non_grecism_pairs_are_rejected() {
        assert!(!compound(Some("Grecisms"), Some("Hy")).is_grecism());
        assert!(!compound(Some("Determinative"), Some("Gr")).is_grecism());
        assert!(!compound(None, Some("Gr")).is_grecism());
        assert!(!compound(Some("Grecisms"), None).is_grecism());
    }

    #[test]
    fn author_validation_requires_both_centuries() {
        let mut author = Author {
            name: "Plautus".to_string(),
            century_of_birth: -3,
            century_of_death: -2,
        };
        assert!(author.is_valid());
        author.century_of_death = 0;
        assert!(!author.is_valid());
        author.century_of_death = -2;
        author.name.clear();
        assert!(!author.is_valid());
    }

    #[test]
    fn work_validation_requires_all_fields() {
        let work = Work {
            title: "Amphitruo".to_string(),
            genre: "comedy".to_string(),
            subgenre: "palliata".to_string(),
            acronym: "Amph.".to_string(),
        };
        assert!(work.is_valid());
        let mut missing = work.clone();
        missing.subgenre.clear();
        assert!(!missing.is_valid());
    }
}
